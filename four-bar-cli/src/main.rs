//! Command line front-end of the four-bar kinematics library.
mod cli;

fn main() {
    cli::Entry::main();
}
