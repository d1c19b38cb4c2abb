//! Scores, ranks and tracks month-over-month trends of AI tools.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{Write, stderr, stdout};
use toolpulse::{Host, run};

/// Host backed by the real process streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() {
    run(&mut RealHost, std::env::args());
}
