use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use web_sys::File;

use crate::api;
use crate::components::lineage_graph::{LineageGraph, LineageGraphCanvas};
use crate::components::notification::{Notification, NotificationToast};
use crate::components::upload_panel::UploadPanel;
use crate::lineage::build_lineage_graph;

/// The dashboard: upload controls, loading state, the lineage graph and
/// transient notifications. Each user action fires one request; the
/// loading flag keeps actions from re-triggering while one is in flight.
#[component]
pub fn Home() -> impl IntoView {
	let loading = RwSignal::new(false);
	let graph = RwSignal::new(None::<LineageGraph>);
	let notification = RwSignal::new(None::<Notification>);
	let selected = RwSignal::new(Vec::<String>::new());

	let on_files = Callback::new(move |files: Vec<File>| {
		let names: Vec<String> = files.iter().map(|f| f.name()).collect();
		selected.set(names.clone());
		loading.set(true);
		spawn_local(async move {
			match api::upload_sql(&files).await {
				Ok(_) => {
					notification.set(Some(Notification::success(format!(
						"Successfully uploaded: {}",
						names.join(", ")
					))));
				}
				Err(err) => {
					warn!("Upload failed: {err}");
					notification.set(Some(Notification::error(format!(
						"Error uploading files: {err}"
					))));
				}
			}
			loading.set(false);
		});
	});

	let on_create = Callback::new(move |_: ()| {
		loading.set(true);
		spawn_local(async move {
			match api::analyze_sql().await {
				Ok(resp) => {
					graph.set(Some(build_lineage_graph(&resp.results)));
					notification.set(Some(Notification::success(
						"Lineage graph generated successfully!",
					)));
				}
				Err(err) => {
					warn!("Analysis failed: {err}");
					notification.set(Some(Notification::error(format!(
						"Error generating lineage: {err}"
					))));
				}
			}
			loading.set(false);
		});
	});

	let on_load_saved = Callback::new(move |_: ()| {
		loading.set(true);
		spawn_local(async move {
			match api::get_descriptions(None).await {
				Ok(rows) => {
					let count = rows.len();
					graph.set(Some(build_lineage_graph(&rows)));
					notification.set(Some(Notification::success(format!(
						"Loaded {count} stored column descriptions"
					))));
				}
				Err(err) => {
					warn!("Loading stored descriptions failed: {err}");
					notification.set(Some(Notification::error(format!(
						"Error loading descriptions: {err}"
					))));
				}
			}
			loading.set(false);
		});
	});

	let graph_view = Signal::derive(move || graph.get().unwrap_or_default());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="dashboard">
				<h1>"SQL Lineage Dashboard"</h1>

				<UploadPanel
					selected=selected
					loading=loading
					on_files=on_files
					on_create=on_create
					on_load_saved=on_load_saved
				/>

				<Show when=move || loading.get()>
					<div class="spinner"></div>
				</Show>

				<Show when=move || graph.get().is_some()>
					<div class="graph-panel">
						<LineageGraphCanvas data=graph_view />
					</div>
				</Show>

				<NotificationToast notification=notification />
			</div>
		</ErrorBoundary>
	}
}
