use std::{ffi::OsString, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};

/// Length of the anti-CSRF `state` sent with the authorization request.
pub const STATE_LENGTH: usize = 64;

/// Flags that may be written with a single dash, Go `flag` style.
const SINGLE_DASH_LONG_FLAGS: [&str; 1] = ["id"];

/// Returns `length` random characters drawn from `[A-Za-z0-9]`.
pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Rewrites `-id X` and `-id=X` into `--id X` and `--id=X` so clap accepts
/// them. Everything else, including arguments after a bare `--`, is left
/// untouched.
pub fn normalize_flag_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::<OsString>::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            arg.to_str()
                .and_then(double_dash)
                .map(OsString::from)
                .unwrap_or(arg)
        })
        .collect()
}

fn double_dash(arg: &str) -> Option<String> {
    let flag = arg.strip_prefix('-').filter(|f| !f.starts_with('-'))?;
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    SINGLE_DASH_LONG_FLAGS
        .contains(&name)
        .then(|| format!("-{arg}"))
}

/// A steady-ticking spinner for requests that may take a while.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
