use std::process::ExitCode;

fn main() -> ExitCode {
    hospital_desk_lib::run()
}
