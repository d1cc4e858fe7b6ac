//! Saving a generated description to disk.

use anyhow::bail;
use chrono::Utc;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    dispatcher::{GenerationResult, Source},
    form::FormState,
};

pub const DOWNLOAD_SUFFIX: &str = "_description.txt";

#[derive(Serialize)]
struct Sidecar<'a> {
    product_name: &'a str,
    tone: Option<&'a str>,
    language: &'a str,
    source: Source,
    created_at: String,
}

/// Each run of whitespace becomes a single `_`; path separators and other
/// characters not allowed in file names become `_` as well.
pub fn download_file_name(product_name: &str) -> String {
    let mut out = String::with_capacity(product_name.len() + DOWNLOAD_SUFFIX.len());
    let mut in_space = false;
    for ch in product_name.chars() {
        if ch.is_whitespace() {
            if !in_space { out.push('_'); }
            in_space = true;
            continue;
        }
        in_space = false;
        match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => out.push('_'),
            c if c.is_control() => out.push('_'),
            c => out.push(c),
        }
    }
    out.push_str(DOWNLOAD_SUFFIX);
    out
}

fn is_safe_filename(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut comps = Path::new(name).components();
    matches!((comps.next(), comps.next()), (Some(Component::Normal(_)), None))
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    {
        let mut f = fs::File::create(&tmp).await?;
        f.write_all(bytes).await?;
        let _ = f.sync_all().await; // best-effort
    }
    fs::rename(&tmp, path).await?;
    Ok(())
}

/// Writes `<name>_description.txt` and a `.json` sidecar next to it.
/// Returns the text file path.
pub async fn save_description(out_dir: &Path, form: &FormState, res: &GenerationResult) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(out_dir).await?;

    let file_name = download_file_name(&form.product_name);
    if !is_safe_filename(&file_name) {
        bail!("refusing to save under unsafe file name: {file_name}");
    }
    let txt = out_dir.join(file_name);
    write_atomic(&txt, res.description.as_bytes()).await?;

    let sidecar = Sidecar {
        product_name: &form.product_name,
        tone: form.tone.map(|t| t.as_str()),
        language: form.language.code(),
        source: res.source,
        created_at: Utc::now().to_rfc3339(),
    };
    let json = txt.with_extension("json");
    write_atomic(&json, &serde_json::to_vec_pretty(&sidecar)?).await?;

    tracing::debug!(path = %txt.display(), "saved description");
    Ok(txt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Language, Tone};

    #[test]
    fn file_name_collapses_whitespace() {
        assert_eq!(download_file_name("Wireless Headphones"), "Wireless_Headphones_description.txt");
        assert_eq!(download_file_name("  Big \t Mug\n"), "_Big_Mug__description.txt");
        assert_eq!(download_file_name("Mug"), "Mug_description.txt");
    }

    #[test]
    fn file_name_never_leaves_the_directory() {
        assert_eq!(download_file_name("../x"), ".._x_description.txt");
        assert_eq!(download_file_name("AC/DC Cable"), "AC_DC_Cable_description.txt");
        assert_eq!(download_file_name("C:\\temp\\mug?"), "C__temp_mug__description.txt");
        for name in ["../x", "AC/DC Cable", "/etc/passwd", "..", "a\\b"] {
            assert!(is_safe_filename(&download_file_name(name)), "{name}");
        }
        assert!(!is_safe_filename("../x"));
        assert!(!is_safe_filename(""));
    }

    #[tokio::test]
    async fn names_with_separators_save_inside_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let res = GenerationResult::remote("text");

        let escaped = save_description(&out, &FormState::new("../escaped", Some(Tone::Casual)), &res).await.unwrap();
        assert_eq!(escaped.parent().unwrap(), out.as_path());
        assert!(out.join(".._escaped_description.txt").exists());
        assert!(!dir.path().join("escaped_description.txt").exists());

        let cable = save_description(&out, &FormState::new("AC/DC Cable", Some(Tone::Casual)), &res).await.unwrap();
        assert_eq!(cable, out.join("AC_DC_Cable_description.txt"));
        assert_eq!(tokio::fs::read_to_string(&cable).await.unwrap(), "text");
    }

    #[tokio::test]
    async fn saves_text_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let form = FormState::new("Trail Shoes", Some(Tone::Casual)).with_language(Language::Es);
        let res = GenerationResult::fallback("Hola");

        let path = save_description(dir.path(), &form, &res).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "Trail_Shoes_description.txt");
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "Hola");

        let meta: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(path.with_extension("json")).await.unwrap()).unwrap();
        assert_eq!(meta["product_name"], "Trail Shoes");
        assert_eq!(meta["tone"], "casual");
        assert_eq!(meta["language"], "es");
        assert_eq!(meta["source"], "fallback");
        assert!(!dir.path().join("Trail_Shoes_description.txt.tmp").exists());
    }
}
