//! Progress bars for long sequential loops (files in a directory, files
//! under analysis). Bars draw to stderr and stay hidden when it is not a
//! terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;

const TEMPLATE: &str = "{msg}: {wide_bar} {pos}/{len} [{elapsed_precise}]";

/// A counting bar of `len` steps labelled with `message`.
pub fn count_bar(len: usize, message: impl Into<Cow<'static, str>>, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    match ProgressStyle::with_template(TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("=> ")),
        Err(e) => tracing::debug!("progress template rejected: {}", e),
    }
    bar.set_message(message);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_bar_still_counts() {
        let bar = count_bar(3, "files", false);
        bar.inc(2);
        assert_eq!(bar.position(), 2);
        bar.finish_and_clear();
    }

    #[test]
    fn visible_bar_has_length() {
        let bar = count_bar(7, "files in /", true);
        assert_eq!(bar.length(), Some(7));
        bar.finish_and_clear();
    }
}
