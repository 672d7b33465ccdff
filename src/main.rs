mod app;
mod assets;
mod audio;
mod config;
mod host;
mod mpris;
mod phone;
mod runtime;
mod scene;
mod ui;
mod widgets;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
