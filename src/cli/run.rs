//! Subcommand implementations.

use anyhow::{Result, bail};

use crate::log;
use crate::model::{Identifiable, Scheme, Site};
use crate::uuid::{ModelUuid, Uri, retrieve_id};

/// `permakey resolve <uri>`: print the content-store key.
pub fn run_resolve(site: &Site, raw: &str) -> Result<()> {
    let uri = Uri::parse(raw)?;
    match uri.resolve(site) {
        Some(model) => {
            println!("{}", model.key());
            Ok(())
        }
        None => bail!("no model found for {uri}"),
    }
}

/// `permakey url <uri>`: print the public permalink.
pub fn run_url(site: &Site, raw: &str) -> Result<()> {
    let uri = Uri::parse(raw)?;
    match uri.permalink(site) {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => bail!("no model found for {uri}, refusing to print a dead link"),
    }
}

/// `permakey assign <scheme> <key>`: ensure a persisted identifier.
pub fn run_assign(site: &Site, scheme: &str, key: &str) -> Result<()> {
    let Some(scheme) = Scheme::from_name(scheme) else {
        bail!("unknown scheme `{scheme}` (expected page, file or user)");
    };
    let Some(model) = site.model(scheme, key) else {
        bail!("no {scheme} model at `{key}`");
    };

    let had_id = retrieve_id(site, &model).is_some();
    let uuid = ModelUuid::ensure(site, &model)?;
    if !had_id {
        log!("uuid"; "assigned {} to {}", uuid.id(), model.key());
    }
    println!("{}", uuid.uri());
    Ok(())
}

/// `permakey index`: list identifier-to-key mappings for all models.
pub fn run_index(site: &Site) -> Result<()> {
    let mut assigned = 0usize;
    let mut missing = 0usize;

    for scheme in Scheme::ALL {
        for model in site.models(scheme) {
            match retrieve_id(site, &model) {
                Some(id) => {
                    println!("{scheme}://{id}\t{}", model.key());
                    assigned += 1;
                }
                None => missing += 1,
            }
        }
    }

    log!("uuid"; "{assigned} identifier(s), {missing} model(s) without one");
    Ok(())
}
