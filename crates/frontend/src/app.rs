use crate::domain::a001_in_app_product::seed::{PageSeed, SeedError};
use crate::domain::a001_in_app_product::ui::{ProductRow, ProductRows, RowAdder, RowEntry};
use crate::shared::page_config::{ConfigError, ROOT_ELEMENT_ID};
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

#[component]
pub fn App(seed: PageSeed) -> impl IntoView {
    let PageSeed {
        config,
        template,
        rows: seeded,
    } = seed;
    let template = Arc::new(template);
    let rows = RwSignal::new(ProductRows::from_seeds(seeded));

    let row_template = Arc::clone(&template);

    view! {
        <div class=move || {
            if rows.with(|r| r.is_empty()) {
                "in-app-products-list empty"
            } else {
                "in-app-products-list"
            }
        }>
            <table class="in-app-products-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Logo"</th>
                        <th>"Name"</th>
                        <th>"Locale"</th>
                        <th>"Price"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.with(|r| r.entries().to_vec())
                        key=|entry: &RowEntry| entry.key
                        children=move |entry: RowEntry| {
                            view! {
                                <ProductRow
                                    seed=entry.seed
                                    config=config.clone()
                                    template=Arc::clone(&row_template)
                                    start_editing=entry.start_editing
                                />
                            }
                        }
                    />
                </tbody>
            </table>
            <RowAdder rows=rows template=template />
        </div>
    }
}

/// Read the server-rendered page and replace it with the editor.
pub fn mount() -> Result<(), SeedError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(SeedError::NoDocument)?;
    let root = document
        .get_element_by_id(ROOT_ELEMENT_ID)
        .ok_or(ConfigError::MissingRoot(ROOT_ELEMENT_ID))?;

    let seed = PageSeed::read(&document, &root)?;
    let root: HtmlElement = root
        .dyn_into()
        .map_err(|_| ConfigError::MissingRoot(ROOT_ELEMENT_ID))?;
    root.set_inner_html("");

    leptos::mount::mount_to(root, move || view! { <App seed=seed /> }).forget();
    Ok(())
}
