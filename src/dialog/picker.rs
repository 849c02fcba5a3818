use std::path::{Path, PathBuf};

/// Modal file and folder prompts
///
/// Implementations return `None` when the user cancels. Desktop builds use
/// native dialogs; tests script the answers.
pub trait PathPicker {
    fn pick_folder(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf>;

    fn pick_file(
        &mut self,
        title: &str,
        start: Option<&Path>,
        filter_name: &str,
        extensions: &[&str],
    ) -> Option<PathBuf>;
}

/// Treat an empty answer the same as a cancelled prompt
pub(crate) fn confirmed(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::*;
    use std::collections::VecDeque;

    /// Picker that replays queued answers and records each prompt
    #[derive(Default)]
    pub struct ScriptedPicker {
        answers: VecDeque<Option<PathBuf>>,
        pub prompts: Vec<(String, Option<PathBuf>)>,
        pub filters: Vec<Vec<String>>,
    }

    impl ScriptedPicker {
        pub fn answering(answers: impl IntoIterator<Item = Option<PathBuf>>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                ..Self::default()
            }
        }

        fn next(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf> {
            self.prompts.push((title.to_string(), start.map(Path::to_path_buf)));
            self.answers.pop_front().flatten()
        }
    }

    impl PathPicker for ScriptedPicker {
        fn pick_folder(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf> {
            self.next(title, start)
        }

        fn pick_file(
            &mut self,
            title: &str,
            start: Option<&Path>,
            _filter_name: &str,
            extensions: &[&str],
        ) -> Option<PathBuf> {
            self.filters.push(extensions.iter().map(|e| e.to_string()).collect());
            self.next(title, start)
        }
    }
}
