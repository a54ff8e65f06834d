use std::{
    io,
    path::{Path, PathBuf},
};

use ::log::{trace, warn};
use ::tokio::fs;

const MAX_FILENAME_LENGTH: usize = 255;

/// Хранилище загруженных файлов на локальном диске.
///
/// Каждый файл лежит в своём каталоге `<root>/<16 hex>/<name>`; относительная
/// часть пути и есть ключ, который пишется в `archive.fileku`.
#[derive(Debug, Clone)]
pub struct Uploads {
    root: PathBuf,
}

impl Uploads {
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// записывает `data` и возвращает ключ
    pub async fn store(&self, filename: &str, data: &[u8]) -> io::Result<String> {
        let dir = format!("{:016x}", ::rand::random::<u64>());
        fs::create_dir(self.root.join(&dir)).await?;

        let key = format!("{}/{}", dir, filename);
        if let Err(e) = fs::write(self.root.join(&key), data).await {
            remove_dir(&self.root.join(&dir)).await;
            return Err(e);
        }

        trace!("stored {} bytes as `{}`", data.len(), key);
        Ok(key)
    }

    /// удаляет файл вместе с его каталогом
    pub async fn remove(&self, key: &str) {
        let path = self.root.join(key);
        if let Err(e) = fs::remove_file(&path).await {
            warn!("failed to remove `{}`: {}", path.display(), e);
            return;
        }
        if let Some(dir) = path.parent().filter(|dir| *dir != self.root) {
            remove_dir(dir).await;
        }
    }
}

async fn remove_dir(dir: &Path) {
    if let Err(e) = fs::remove_dir(dir).await {
        warn!("failed to remove directory `{}`: {}", dir.display(), e);
    }
}

/// Убирает из присланного имени каталоги и всё, кроме `[A-Za-z0-9._-]`.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let sanitized: String = name
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();

    if sanitized.trim_matches(['.', '_']).is_empty() {
        return String::from("file");
    }

    sanitized
}
