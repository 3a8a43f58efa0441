//! Host-side helper: `cargo run` builds the wasm pkg into `static/pkg` and serves
//! `static/` locally.

#[cfg(not(target_arch = "wasm32"))]
mod dev {
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context, Result};
    use clap::Parser;

    #[derive(Debug, Parser)]
    #[command(about = "Build and serve the landing page")]
    pub struct Args {
        /// Port for the local HTTP server.
        #[arg(long, default_value_t = 8000)]
        pub port: u16,

        /// Serve whatever is already in `static/pkg`.
        #[arg(long)]
        pub skip_build: bool,
    }

    pub fn run(args: Args) -> Result<()> {
        if !args.skip_build {
            println!("Building WASM pkg …");
            let status = Command::new("wasm-pack")
                .args([
                    "build",
                    "--release",
                    "--target",
                    "web",
                    "--out-dir",
                    "static/pkg",
                ])
                .status()
                .context("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/)")?;
            if !status.success() {
                bail!("wasm-pack finished with errors");
            }
        }

        println!("Serving static/ at http://127.0.0.1:{} …", args.port);
        let status = Command::new("python3")
            .args(["-m", "http.server", &args.port.to_string(), "--directory", "static"])
            .stdout(Stdio::null())
            .status()
            .context("failed to start http server")?;
        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    dev::run(dev::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
