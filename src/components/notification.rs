//! Single-slot transient toast, MUI-Snackbar-style.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use leptos::prelude::*;

const AUTO_HIDE: Duration = Duration::from_millis(6000);

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
	Success,
	Error,
	Info,
}

impl Severity {
	pub fn css_class(self) -> &'static str {
		match self {
			Severity::Success => "success",
			Severity::Error => "error",
			Severity::Info => "info",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
	pub message: String,
	pub severity: Severity,
	// Distinguishes repeated toasts with identical text, so an old
	// auto-hide timer never dismisses a newer toast.
	id: u64,
}

impl Notification {
	fn new(message: impl Into<String>, severity: Severity) -> Self {
		Self {
			message: message.into(),
			severity,
			id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
		}
	}

	pub fn success(message: impl Into<String>) -> Self {
		Self::new(message, Severity::Success)
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self::new(message, Severity::Error)
	}

	pub fn info(message: impl Into<String>) -> Self {
		Self::new(message, Severity::Info)
	}
}

/// Renders the current notification, if any. One slot only: a new toast
/// replaces the old one, so a failed request surfaces exactly one error.
/// Auto-hides after six seconds, or on click.
#[component]
pub fn NotificationToast(notification: RwSignal<Option<Notification>>) -> impl IntoView {
	Effect::new(move |_| {
		let Some(current) = notification.get() else {
			return;
		};
		set_timeout(
			move || {
				// Only dismiss if a newer toast hasn't replaced this one.
				notification.update(|n| {
					if n.as_ref() == Some(&current) {
						*n = None;
					}
				});
			},
			AUTO_HIDE,
		);
	});

	view! {
		{move || {
			notification
				.get()
				.map(|n| {
					let class = format!("toast toast-{}", n.severity.css_class());
					view! {
						<div class=class on:click=move |_| notification.set(None)>
							{n.message.clone()}
						</div>
					}
				})
		}}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn constructors_tag_severity() {
		assert_eq!(Notification::success("ok").severity, Severity::Success);
		assert_eq!(Notification::error("no").severity, Severity::Error);
		assert_eq!(Notification::info("hm").severity, Severity::Info);
	}

	#[test]
	fn repeated_toasts_with_identical_text_are_distinct() {
		let first = Notification::success("Lineage graph generated successfully!");
		let second = Notification::success("Lineage graph generated successfully!");
		// The dismiss guard compares the stored toast against the one a
		// timer was armed for; identical text must not alias them.
		assert_ne!(first, second);
		assert_eq!(first.clone(), first);
	}

	#[test]
	fn severity_maps_to_css_class() {
		assert_eq!(Severity::Success.css_class(), "success");
		assert_eq!(Severity::Error.css_class(), "error");
		assert_eq!(Severity::Info.css_class(), "info");
	}
}
