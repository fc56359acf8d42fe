use regex::Regex;

use crate::env_state::TidarEnv;
use crate::tidar_errors::TidarError;

/// Extract the file names from a PDS `indexlist` directory page.
///
/// The archive serves plain auto-index pages whose single `<table id="indexlist">` lists one
/// anchor per entry. Sort links (`?C=N;O=D`) and directory/parent links are dropped; what
/// remains are the plain file names in listing order.
pub(crate) fn scrape_index_filenames(html: &str, url: &str) -> Result<Vec<String>, TidarError> {
    let Some(table_start) = html.find("<table id=\"indexlist\"") else {
        return Err(TidarError::RemoteListingNotFound {
            url: url.to_string(),
        });
    };
    let table = match html[table_start..].find("</table>") {
        Some(table_end) => &html[table_start..table_start + table_end],
        None => &html[table_start..],
    };

    let href = Regex::new(r#"href="([^"]+)""#).expect("static regex");
    let mut filenames = Vec::new();
    for capture in href.captures_iter(table) {
        let target = &capture[1];
        if target.starts_with('?') || target.contains('/') {
            continue;
        }
        filenames.push(target.to_string());
    }
    Ok(filenames)
}

/// Fetch a PDS directory page and return its file names.
pub(crate) fn list_remote_files(env: &TidarEnv, url: &str) -> Result<Vec<String>, TidarError> {
    let html = env.get_from_url(url)?;
    scrape_index_filenames(&html, url)
}
