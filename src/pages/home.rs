use std::collections::HashMap;

use leptos::prelude::*;

use crate::components::similarity_graph::{
	CategoryCount, Dataset, FilterState, GraphCounts, GraphSettings, SimilarityGraphCanvas,
};

const DATASET: &str = include_str!("../../assets/dataset.json");

fn load_dataset() -> Dataset {
	Dataset::from_json(DATASET).unwrap_or_else(|err| {
		log::error!("Failed to parse dataset: {err}");
		Dataset::default()
	})
}

/// Wider fit padding so the overlay panel doesn't cover the outer nodes.
fn demo_settings() -> GraphSettings {
	GraphSettings {
		fit_padding: 80.0,
		..GraphSettings::default()
	}
}

fn fraction(count: CategoryCount) -> String {
	format!("{}/{}", count.visible, count.total)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let dataset = load_dataset();
	let tag_keys: Vec<String> = dataset.tags.iter().map(|t| t.key.clone()).collect();
	let tag_total = tag_keys.len();
	let (filters, set_filters) = signal(FilterState::select_all(&dataset));
	let (counts, set_counts) = signal(GraphCounts::default());
	let dataset = Signal::derive(move || dataset.clone());

	let all_tags = tag_keys.clone();
	let select_all = move |_| {
		let tags: HashMap<String, bool> = all_tags.iter().map(|k| (k.clone(), true)).collect();
		set_filters.update(|f| f.set_tags(tags));
	};
	let select_none = move |_| set_filters.update(|f| f.set_tags(HashMap::new()));

	let tag_rows = tag_keys
		.into_iter()
		.map(|key| {
			let (key_checked, key_toggle, key_count) = (key.clone(), key.clone(), key.clone());
			view! {
				<li class="caption-row">
					<label>
						<input
							type="checkbox"
							prop:checked=move || filters.with(|f| f.is_tag_active(&key_checked))
							on:change=move |_| set_filters.update(|f| f.toggle_tag(&key_toggle))
						/>
						<span>{key}</span>
						<span class="text-muted">
							" "
							{move || {
								counts
									.with(|c| fraction(c.tags.get(&key_count).copied().unwrap_or_default()))
							}}
						</span>
					</label>
				</li>
			}
		})
		.collect_view();

	let summary = move || {
		counts.with(|c| {
			format!(
				"{} nodes ({} visible), {} edges ({} visible)",
				c.nodes, c.visible_nodes, c.edges, c.visible_edges
			)
		})
	};
	let clusters = move || {
		counts.with(|c| {
			c.clusters
				.iter()
				.map(|(key, count)| format!("{key} {}", fraction(*count)))
				.collect::<Vec<_>>()
				.join(", ")
		})
	};

	view! {
		<div class="fullscreen-graph">
			<SimilarityGraphCanvas
				dataset=dataset
				filters=filters
				counts=set_counts
				settings=demo_settings()
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Similarity Graph"</h1>
				<p class="subtitle">{summary}</p>
				<p class="subtitle">{clusters}</p>
				<h2>
					"Tags "
					<span class="text-muted">
						{move || filters.with(|f| format!("({} / {})", f.active_tag_count(), tag_total))}
					</span>
				</h2>
				<p class="buttons">
					<button class="btn" on:click=select_all>"Select all"</button>
					" "
					<button class="btn" on:click=select_none>"Select none"</button>
				</p>
				<ul>{tag_rows}</ul>
				<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
			</div>
		</div>
	}
}
