//! Lazily loaded card images.
//!
//! Image references (usually base64 `data:` URLs) are handed to an
//! `HtmlImageElement` the first time a card is drawn. Until the browser has
//! decoded the image the renderer falls back to initials.

use std::collections::HashMap;

use log::warn;
use web_sys::HtmlImageElement;

use super::types::RecordId;

struct Avatar {
	src: String,
	image: Option<HtmlImageElement>,
}

/// Image elements keyed by card id.
#[derive(Default)]
pub struct AvatarCache {
	entries: HashMap<RecordId, Avatar>,
}

impl AvatarCache {
	/// Returns the decoded image for `id`, starting a load on first use or
	/// when `src` changed.
	pub fn get(&mut self, id: RecordId, src: &str) -> Option<&HtmlImageElement> {
		let stale = self.entries.get(&id).is_none_or(|a| a.src != src);
		if stale {
			self.entries.insert(
				id,
				Avatar {
					src: src.to_string(),
					image: load(src),
				},
			);
		}

		let image = self.entries.get(&id)?.image.as_ref()?;
		(image.complete() && image.natural_width() > 0).then_some(image)
	}

	/// Forgets images of cards that are gone.
	pub fn retain(&mut self, keep: impl Fn(RecordId) -> bool) {
		self.entries.retain(|id, _| keep(*id));
	}
}

fn load(src: &str) -> Option<HtmlImageElement> {
	match HtmlImageElement::new() {
		Ok(image) => {
			image.set_src(src);
			Some(image)
		}
		Err(e) => {
			warn!("org-chart: cannot create image element: {:?}", e);
			None
		}
	}
}
