//! Issue tracker entrypoint.

fn main() -> anyhow::Result<()> {
    issues::initialize_command_line()
}
