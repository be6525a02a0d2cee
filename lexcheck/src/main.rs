mod app;
mod cli;
mod discovery;
mod execution;
mod panic_message;

fn main() {
    std::process::exit(app::run());
}
