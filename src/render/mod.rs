//! Static HTML gallery page.
//!
//! One `div.photo-item` tile per photo, in gallery order. Column placement
//! happens in the browser (`static/masonry.js`); the document itself is a
//! flat, ordered list of tiles.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! so every URL and timestamp is escaped on the way out. Feed URLs with a
//! scheme other than `http` or `https` are replaced by `#`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use maud::{html, Markup, PreEscaped, DOCTYPE};
use url::Url;

use crate::app::{PhotowallError, Result};
use crate::config::PageConfig;
use crate::domain::Gallery;

const CSS: &str = include_str!("../../static/gallery.css");
const JS: &str = include_str!("../../static/masonry.js");

#[derive(Debug, Clone)]
pub struct Renderer {
    title: String,
    refresh_secs: u64,
}

impl Renderer {
    pub fn new(title: impl Into<String>, refresh_secs: u64) -> Self {
        Self {
            title: title.into(),
            refresh_secs,
        }
    }

    pub fn from_config(page: &PageConfig) -> Self {
        Self::new(page.title.clone(), page.refresh_secs)
    }

    pub fn render_markup(&self, gallery: &Gallery) -> Markup {
        let refresh = (self.refresh_secs > 0).then_some(self.refresh_secs);

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    @if let Some(secs) = refresh {
                        meta http-equiv="refresh" content=(secs);
                    }
                    title { (self.title) }
                    style { (PreEscaped(CSS)) }
                }
                body {
                    div.masonry {
                        @for photo in gallery {
                            @let alt = format!("Photo from {}", photo.published_at());
                            div.photo-item {
                                a href=(safe_url(photo.permalink())) target="_blank" rel="noopener noreferrer" {
                                    img src=(safe_url(photo.image_url())) alt=(alt) loading="lazy";
                                }
                            }
                        }
                    }
                    script { (PreEscaped(JS)) }
                }
            }
        }
    }

    /// Compose the whole document, then write it to `sink` in one go.
    pub fn render<W: Write>(&self, gallery: &Gallery, sink: &mut W) -> Result<()> {
        let document = self.render_markup(gallery).into_string();
        sink.write_all(document.as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    /// Write the document to `path`, replacing any previous page atomically.
    ///
    /// The page is written to a hidden sibling file first and renamed into
    /// place, so readers never observe a half-written document.
    pub fn write_to_path(&self, gallery: &Gallery, path: &Path) -> Result<()> {
        let write_err = |source: std::io::Error| PhotowallError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let staging = staging_path(path);
        let result = fs::File::create(&staging)
            .map_err(write_err)
            .and_then(|mut file| {
                self.render(gallery, &mut file).map_err(|e| match e {
                    PhotowallError::Io(source) => write_err(source),
                    other => other,
                })?;
                file.sync_all().map_err(write_err)
            })
            .and_then(|()| fs::rename(&staging, path).map_err(write_err));

        if result.is_err() {
            let _ = fs::remove_file(&staging);
        }
        result?;

        tracing::info!("Wrote {} photos to {}", gallery.len(), path.display());
        Ok(())
    }
}

/// `raw` if it is an http(s) or relative URL, `#` otherwise.
fn safe_url(raw: &str) -> &str {
    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => raw,
        Err(url::ParseError::RelativeUrlWithoutBase) => raw,
        _ => "#",
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index.html".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
