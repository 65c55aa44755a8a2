use crate::download::Fetched;
use crate::select::{Choice, Selector};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Where and how a resolved binary is written
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    pub dir: PathBuf,
    /// Ask for the file name instead of using the cleaned one
    pub pick_name: bool,
    /// Overwrite without asking
    pub force: bool,
}

/// Let the user choose between the cleaned and the original name, or type one
pub fn choose_name(selector: &mut dyn Selector, fetched: &Fetched) -> Result<String> {
    let mut options = vec![fetched.clean_name.clone()];
    if fetched.file.name != fetched.clean_name {
        options.push(fetched.file.name.clone());
    }

    let name = match selector.select_or_custom("Save binary as (or type a name):", &options)? {
        Choice::Index(i) => options[i].clone(),
        Choice::Custom(name) => name,
    };
    Ok(name)
}

/// Write the resolved binary into `opts.dir`, returning its path
pub fn save_binary(
    selector: &mut dyn Selector,
    fetched: &Fetched,
    opts: &SaveOptions,
) -> Result<PathBuf> {
    let name = if opts.pick_name {
        choose_name(selector, fetched)?
    } else {
        fetched.clean_name.clone()
    };
    if !is_plain_file_name(&name) {
        return Err(anyhow::anyhow!(
            "Refusing to save as {name:?}: not a plain file name inside {}",
            opts.dir.display()
        ));
    }
    let path = opts.dir.join(&name);

    if path.exists() && !opts.force {
        let question = format!("{} already exists, overwrite?", path.display());
        if !selector.confirm(&question)? {
            return Err(anyhow::anyhow!("Not overwriting {}", path.display()));
        }
    }

    write_file(&path, &fetched.file.source)?;
    Ok(path)
}

/// A single normal path component, so joining it cannot leave the output directory
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}
