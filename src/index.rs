//! Landing page for the aggregated site.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use minijinja::{context, Environment};
use serde::Serialize;

use crate::config::RepositoryDescriptor;
use crate::error::{Error, Result};

/// One entry on the landing page.
#[derive(Debug, Clone, Serialize)]
struct IndexEntry {
    name: String,
    doc_type: String,
}

/// Renders the landing page listing every configured repository.
///
/// Entries link to `{name}/index.html` whether or not that build succeeded.
pub fn render_index(repos: &[RepositoryDescriptor], generated_at: &str) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;

    let entries: Vec<IndexEntry> = repos
        .iter()
        .map(|repo| IndexEntry {
            name: repo.name.clone(),
            doc_type: repo.doc_type.to_string(),
        })
        .collect();

    let html = env.get_template("index.html")?.render(context! {
        repos => entries,
        generated_at => generated_at,
    })?;
    Ok(html)
}

/// Writes `index.html` into `html_root`, stamped with the current local time.
pub fn write_index(html_root: &Path, repos: &[RepositoryDescriptor]) -> Result<PathBuf> {
    info!("Creating main index page");

    let generated_at = chrono::Local::now()
        .format("%a %b %e %H:%M:%S %Z %Y")
        .to_string();
    let html = render_index(repos, &generated_at)?;

    fs::create_dir_all(html_root)?;
    let index_path = html_root.join("index.html");
    fs::write(&index_path, html).map_err(|e| Error::Filesystem {
        message: format!("Failed to write '{}': {}", index_path.display(), e),
    })?;
    Ok(index_path)
}

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Documentation Hub</title>
  <style>
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
    .container { background: #fff; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1); }
    h1 { color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }
    .repo-list { list-style: none; padding: 0; }
    .repo-item { margin: 15px 0; padding: 15px; background: #f8f9fa; border-left: 4px solid #3498db; border-radius: 4px; }
    .repo-item a { text-decoration: none; color: #2c3e50; font-weight: 500; font-size: 1.1em; }
    .repo-item a:hover { color: #3498db; }
    .repo-type { color: #666; margin-top: 5px; font-size: 0.9em; }
    .footer { text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; color: #666; font-size: 0.9em; }
  </style>
</head>
<body>
  <div class="container">
    <h1>Documentation Hub</h1>
    <p>Choose a documentation set to explore:</p>
    <ul class="repo-list">
    {%- for repo in repos %}
      <li class="repo-item">
        <a href="{{ repo.name|urlencode }}/index.html">{{ repo.name }}</a>
        <div class="repo-type">Type: {{ repo.doc_type }}</div>
      </li>
    {%- endfor %}
    </ul>
    <div class="footer">
      <p>Last updated: {{ generated_at }}</p>
    </div>
  </div>
</body>
</html>
"##;
