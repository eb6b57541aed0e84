use std::process::ExitCode;

fn main() -> ExitCode {
    match license_gate::run() {
        Ok(Some(result)) => {
            if !result.all_passed() {
                eprintln!(
                    "license-gate: {} of {} file(s) failed the license header check",
                    result.failed(),
                    result.checked()
                );
            }
            ExitCode::from(result.exit_code())
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("license-gate: {}", e);
            ExitCode::FAILURE
        }
    }
}
