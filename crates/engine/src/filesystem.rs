use crate::config::WalkOptions;
use crate::error::EngineError;
use crossbeam_channel::Sender;
use ignore::WalkBuilder;
use std::path::PathBuf;

/// Parallel recursive directory walk sending every regular file to `tx`.
///
/// Roots may be files or directories. Per-entry errors (permission denied,
/// broken links) are logged and skipped. Roots that do not exist are not
/// walked; each one comes back as its own error while the others are
/// walked as usual.
pub fn walk_parallel(options: &WalkOptions, tx: &Sender<PathBuf>) -> Vec<EngineError> {
    let (existing, missing): (Vec<&PathBuf>, Vec<&PathBuf>) =
        options.roots.iter().partition(|root| root.exists());
    let errors: Vec<_> = missing
        .into_iter()
        .map(|root| EngineError::Config(format!("path not found: {}", root.display())))
        .collect();

    let Some((first, rest)) = existing.split_first() else {
        return errors;
    };

    let mut builder = WalkBuilder::new(first);
    for root in rest {
        builder.add(root);
    }

    builder
        .threads(options.threads)
        .hidden(!options.hidden)
        .git_ignore(options.git_ignore)
        .git_exclude(options.git_ignore)
        .ignore(options.git_ignore)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth);

    let walker = builder.build_parallel();
    walker.run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    if tx.send(entry.into_path()).is_err() {
                        return ignore::WalkState::Quit;
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("walk: {e}"),
            }
            ignore::WalkState::Continue
        })
    });

    errors
}
