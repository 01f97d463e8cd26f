use std::process::ExitCode;

fn main() -> ExitCode {
    match coco2kitti::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
