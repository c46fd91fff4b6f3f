//! Identifier lifecycle for content-backed models: lazy generation and
//! durable persistence.

use std::time::Duration;

use super::uri::Uri;
use super::{UuidError, permalink, token};
use crate::auth::Principal;
use crate::content::{ContentRecord, StoreError};
use crate::core::ModelKey;
use crate::debug;
use crate::model::{Identifiable, Model, Site};

/// A model's identifier, guaranteed persisted.
///
/// Construction through [`ModelUuid::ensure`] generates and persists an
/// identifier when the model's content record has none, so a live value
/// always carries a non-empty host.
#[derive(Debug, Clone)]
pub struct ModelUuid {
    uri: Uri,
    key: ModelKey,
}

impl ModelUuid {
    /// Construct for a model, making sure a persisted identifier exists
    /// before returning.
    ///
    /// When generation races with a concurrent writer, the id reported
    /// by [`store_id`] (the one actually persisted) is adopted, not
    /// necessarily the one generated here.
    pub fn ensure(site: &Site, model: &Model) -> Result<Self, UuidError> {
        let id = match retrieve_id(site, model) {
            Some(id) => id,
            None => {
                let mut candidate = token::generate(model.key().as_str());
                // Regenerate on a cache collision with another model's id.
                while site
                    .uuids()
                    .contains(&Uri::from_parts(model.scheme(), &candidate).to_string())
                {
                    candidate = token::generate(model.key().as_str());
                }
                store_id(site, model, &candidate)?
            }
        };

        let uri = Uri::from_parts(model.scheme(), &id);
        site.uuids().insert(uri.to_string(), model.key().clone());
        Ok(Self {
            uri,
            key: model.key().clone(),
        })
    }

    /// The identifier token. Non-empty by construction; repeated calls
    /// return the same string and perform no writes.
    pub fn id(&self) -> &str {
        self.uri.host()
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn key(&self) -> &ModelKey {
        &self.key
    }

    /// Public permalink for this identifier.
    ///
    /// The permalink route resolves incoming requests by cache lookup
    /// only, so the cache entry is (re)inserted before the URL is
    /// advertised.
    pub fn url(&self, site: &Site) -> String {
        site.uuids().insert(self.uri.to_string(), self.key.clone());
        permalink::format_permalink(site.config(), &self.uri)
    }
}

/// Read a model's persisted identifier. Pure read: no generation, no
/// writes. Unreadable records count as having no identifier.
pub fn retrieve_id(site: &Site, model: &Model) -> Option<String> {
    match site.read_content(model, None) {
        Ok(record) => record.uuid().map(str::to_string),
        Err(e) => {
            debug!("uuid"; "unreadable record for {}://{}: {e}", model.scheme(), model.key());
            None
        }
    }
}

/// Persist `id` into the model's content record, returning the id that
/// is actually persisted afterwards.
///
/// The write runs under system elevation (the acting principal may not
/// be allowed to touch the `uuid` field); the previous principal is
/// restored on every exit path. An identifier already present in the
/// record is never overwritten — under concurrent generation the loser
/// adopts the winner's id and no data is corrupted. This read-then-write
/// check is the sole cross-process safeguard and has a small race
/// window; see the module docs.
pub fn store_id(site: &Site, model: &Model, id: &str) -> Result<String, UuidError> {
    let _elevated = site.auth().impersonate(Principal::System);

    let mut record = read_settled(site, model)?;
    if let Some(existing) = record.uuid() {
        debug!("uuid"; "{} already carries {existing}, keeping it", model.key());
        return Ok(existing.to_string());
    }

    record.set_uuid(id);
    site.write_content(model, &record, None)?;

    // Mirror into the default-locale translation record so multilang
    // reads see the identifier regardless of which record they hit.
    if site.config().multilang() {
        let locale = site.config().default_locale().to_string();
        let mut translation = site.read_content(model, Some(&locale))?;
        if translation.uuid().is_none() {
            translation.set_uuid(id);
            site.write_content(model, &translation, Some(&locale))?;
        }
    }

    debug!("uuid"; "persisted {id} for {}://{}", model.scheme(), model.key());
    Ok(id.to_string())
}

/// One bounded re-read after ~1ms when the first read comes back empty,
/// to ride out a read-after-write race with an external writer. Atomic
/// renames on the write path are the actual safeguard; an empty second
/// read is a legitimately new record and proceeds as such.
fn read_settled(site: &Site, model: &Model) -> Result<ContentRecord, StoreError> {
    let record = site.read_content(model, None)?;
    if !record.is_empty() {
        return Ok(record);
    }
    std::thread::sleep(Duration::from_millis(1));
    site.read_content(model, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::model::Scheme;
    use std::fs;
    use tempfile::TempDir;

    fn site_with(files: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        for (rel, text) in files {
            let path = content.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
        let site = Site::load(SiteConfig::with_root(dir.path()));
        (dir, site)
    }

    fn page(site: &Site, key: &str) -> Model {
        site.model(Scheme::Page, key).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let (_dir, site) = site_with(&[("blog/page.toml", "title = \"Blog\"\n")]);
        let model = page(&site, "blog");

        let stored = store_id(&site, &model, "abc123").unwrap();
        assert_eq!(stored, "abc123");
        assert_eq!(retrieve_id(&site, &model).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_no_overwrite() {
        let (_dir, site) = site_with(&[("blog/page.toml", "uuid = \"abc123\"\n")]);
        let model = page(&site, "blog");

        let stored = store_id(&site, &model, "zzz999").unwrap();
        assert_eq!(stored, "abc123");
        assert_eq!(retrieve_id(&site, &model).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_store_is_a_merge() {
        let (dir, site) = site_with(&[("blog/page.toml", "title = \"Blog\"\ndraft = true\n")]);
        let model = page(&site, "blog");

        store_id(&site, &model, "abc123").unwrap();

        let text = fs::read_to_string(dir.path().join("content/blog/page.toml")).unwrap();
        let record = ContentRecord::from_toml(&text).unwrap();
        assert_eq!(record.uuid(), Some("abc123"));
        assert_eq!(record.get("title").and_then(|v| v.as_str()), Some("Blog"));
        assert_eq!(record.get("draft").and_then(|v| v.as_bool()), Some(true));
    }

    #[test]
    fn test_ensure_generates_and_persists() {
        let (dir, site) = site_with(&[("blog/page.toml", "")]);
        let model = page(&site, "blog");

        let uuid = ModelUuid::ensure(&site, &model).unwrap();
        let id = uuid.id().to_string();
        assert_eq!(id.len(), token::TOKEN_LEN);

        // Durably persisted, not just in memory.
        let text = fs::read_to_string(dir.path().join("content/blog/page.toml")).unwrap();
        assert!(text.contains(&id));

        // Cached under its full identifier string.
        assert!(site.uuids().contains(&format!("page://{id}")));
    }

    #[test]
    fn test_id_is_idempotent_and_read_only_after_first_call() {
        let (dir, site) = site_with(&[("blog/page.toml", "")]);
        let model = page(&site, "blog");

        let first = ModelUuid::ensure(&site, &model).unwrap().id().to_string();

        // An external writer adds a field behind the store's back; a
        // second ensure must read, not rewrite.
        let record_path = dir.path().join("content/blog/page.toml");
        let mut text = fs::read_to_string(&record_path).unwrap();
        text.push_str("marker = 1\n");
        fs::write(&record_path, &text).unwrap();
        site.store().invalidate(std::path::Path::new("blog/page.toml"));

        let second = ModelUuid::ensure(&site, &model).unwrap().id().to_string();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&record_path).unwrap(), text);
    }

    #[test]
    fn test_auth_restored_after_success_and_failure() {
        let (dir, site) = site_with(&[("blog/page.toml", "")]);
        let model = page(&site, "blog");
        let before = site.auth().current();

        store_id(&site, &model, "abc123").unwrap();
        assert_eq!(site.auth().current(), before);

        // Force a write failure: the record path of a second page is a
        // directory, so the rename target is unwritable.
        fs::create_dir_all(dir.path().join("content/broken/page.toml")).unwrap();
        let broken = Model::Page(crate::model::Page::new(
            ModelKey::new("broken").unwrap(),
        ));
        assert!(store_id(&site, &broken, "def456").is_err());
        assert_eq!(site.auth().current(), before);
    }

    #[test]
    fn test_multilang_mirrors_default_locale() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content/blog");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("page.toml"), "title = \"Blog\"\n").unwrap();
        fs::write(content.join("page.en.toml"), "title = \"Blog (en)\"\n").unwrap();

        let mut config = SiteConfig::with_root(dir.path());
        config.languages.default = "en".into();
        config.languages.codes = vec!["en".into(), "de".into()];
        let site = Site::load(config);
        let model = page(&site, "blog");

        store_id(&site, &model, "abc123").unwrap();

        let translation = ContentRecord::from_toml(
            &fs::read_to_string(content.join("page.en.toml")).unwrap(),
        )
        .unwrap();
        assert_eq!(translation.uuid(), Some("abc123"));
        assert_eq!(
            translation.get("title").and_then(|v| v.as_str()),
            Some("Blog (en)")
        );
    }

    #[test]
    fn test_end_to_end_new_page() {
        let (_dir, site) = site_with(&[("blog/fresh/page.toml", "")]);
        let model = page(&site, "blog/fresh");

        assert_eq!(retrieve_id(&site, &model), None);

        let uuid = ModelUuid::ensure(&site, &model).unwrap();
        let id = uuid.id().to_string();
        assert!(!id.is_empty());
        assert_eq!(retrieve_id(&site, &model).as_deref(), Some(id.as_str()));

        let url = uuid.url(&site);
        assert_eq!(url, format!("http://localhost/@/page/{id}"));
    }
}
