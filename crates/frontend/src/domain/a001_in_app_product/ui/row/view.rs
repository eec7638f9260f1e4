use super::logo::LogoEditor;
use super::state::{ProductRowState, SaveOutcome};
use crate::domain::a001_in_app_product::api;
use crate::domain::a001_in_app_product::price_points::price_formatter;
use crate::domain::a001_in_app_product::seed::{ProductSeed, RowTemplate};
use crate::shared::components::ui::{Button, ButtonVariant};
use crate::shared::display_text::{identity_formatter, DisplayText, Formatted, Formatter};
use crate::shared::event_bus::EventBus;
use crate::shared::icons::icon;
use crate::shared::inline_edit::{EditEvent, FieldCommand, FieldInput, FieldRegistry, InlineEditField};
use crate::shared::page_config::PageConfig;
use contracts::domain::a001_in_app_product::{FieldValue, ProductField, Snapshot};
use leptos::prelude::*;
use std::rc::Rc;
use std::sync::Arc;

fn active_formatter() -> Formatter {
    Rc::new(|value: &FieldValue| {
        let label = if value.as_flag().unwrap_or(false) {
            "Enabled"
        } else {
            "Disabled"
        };
        Formatted::Ready(label.to_string())
    })
}

/// One in-app product: inline fields, logo editor, GUID and row actions.
#[component]
pub fn ProductRow(
    seed: ProductSeed,
    config: PageConfig,
    template: Arc<RowTemplate>,
    #[prop(optional)] start_editing: bool,
) -> impl IntoView {
    let initial_locale = seed.locale.clone().resolve();
    let state = match ProductRowState::new(seed.guid.clone(), initial_locale.as_text(), start_editing) {
        Ok(state) => RwSignal::new(state),
        Err(e) => {
            log::error!("in-app product row {:?} not initialized: {}", seed.guid, e);
            return view! {
                <tr class="in-app-product-row in-app-product-row--broken">
                    <td colspan="7" class="in-app-product-error">{e.to_string()}</td>
                </tr>
            }
            .into_any();
        }
    };

    let bus = EventBus::<EditEvent>::new();
    // Passive observers of the whole record (GUID display)
    let changes = EventBus::<Snapshot>::new();
    let registry = FieldRegistry::new();
    // Handlers stored on the bus reach it through here, not through an Rc clone
    let bus_sv = StoredValue::new_local(bus.clone());

    let save: Rc<dyn Fn()> = {
        let registry = registry.clone();
        Rc::new(move || {
            let Some(request) = state.try_update(|s| s.begin_save(&config)).flatten() else {
                log::debug!("save already in progress");
                return;
            };
            log::info!("saving product {} {}", request.method, request.url);
            log::debug!("save body: {:?}", request.body);

            let registry = registry.clone();
            leptos::task::spawn_local(async move {
                let result = api::save_product(&request).await;
                let Some(outcome) = state.try_update(|s| s.finish_save(result)) else {
                    return;
                };
                match outcome {
                    SaveOutcome::Saved(product) => {
                        log::info!("product saved: {}", product.guid);
                        bus_sv.get_value().publish(&EditEvent::DoneEdit);
                    }
                    SaveOutcome::FieldErrors(errors) => {
                        log::warn!("product rejected: {:?}", errors);
                        let unrouted = registry.route_errors(&errors);
                        if !unrouted.is_empty() {
                            bus_sv.get_value().publish(&EditEvent::Errors(unrouted));
                        }
                    }
                    SaveOutcome::Failed(text) => {
                        log::warn!("failed to save product: {}", text);
                        bus_sv.get_value().publish(&EditEvent::Errors(vec![text]));
                    }
                }
            });
        })
    };

    bus.subscribe({
        let registry = registry.clone();
        let changes = changes.clone();
        move |event: &EditEvent| match event {
            EditEvent::ValueChanged { field, value } => {
                let shown = state.try_update(|s| s.apply_change(*field, value)).flatten();
                if let Some(name) = shown {
                    registry.send(ProductField::Name, FieldCommand::SetValue(FieldValue::Text(name)));
                }
            }
            EditEvent::SaveRequested => save(),
            EditEvent::StartEdit => state.update(|s| s.start_edit()),
            EditEvent::DoneEdit => {
                state.update(|s| s.done_edit());
                changes.publish(&state.with_untracked(|s| s.product.snapshot()));
            }
            EditEvent::Errors(messages) => state.update(|s| s.show_error(messages)),
        }
    });

    // GUID has no widget of its own; its errors go to the row
    registry.register(
        ProductField::Guid,
        Callback::new(move |command: FieldCommand| {
            if let FieldCommand::ShowErrors(errors) = command {
                state.update(|s| s.show_error(&errors));
            }
        }),
    );

    let editing = Signal::derive(move || state.with(|s| s.editing));
    let saving = Signal::derive(move || state.with(|s| s.saving));

    let on_edit = Callback::new(move |_: leptos::ev::MouseEvent| {
        bus_sv.get_value().publish(&EditEvent::StartEdit);
    });
    let on_save = Callback::new(move |_: leptos::ev::MouseEvent| {
        bus_sv.get_value().publish(&EditEvent::SaveRequested);
    });

    let ProductSeed {
        name,
        locale,
        price,
        active,
        logo_url,
        ..
    } = seed;

    let cells = view! {
        <td class="in-app-product-guid">
            <DisplayText source=changes.clone() field=ProductField::Guid formatter=identity_formatter() />
        </td>
        <LogoEditor initial=logo_url editing=editing bus=bus.clone() registry=registry.clone() />
        <InlineEditField
            field=ProductField::Name
            class="in-app-product-name"
            input=FieldInput::text()
            seed=name
            bus=bus.clone()
            registry=registry.clone()
            start_editing=start_editing
        />
        <InlineEditField
            field=ProductField::Locale
            class="in-app-product-locale"
            input=FieldInput::select(template.locales.clone())
            seed=locale
            bus=bus.clone()
            registry=registry.clone()
            start_editing=start_editing
        />
        <InlineEditField
            field=ProductField::PriceId
            class="in-app-product-price"
            input=FieldInput::select(template.price_points.options().to_vec())
            seed=price
            bus=bus.clone()
            registry=registry.clone()
            formatter=price_formatter(Arc::clone(&template.price_points))
            start_editing=start_editing
        />
        <InlineEditField
            field=ProductField::Active
            class="in-app-product-active"
            input=FieldInput::checkbox()
            seed=active
            bus=bus.clone()
            registry=registry.clone()
            formatter=active_formatter()
            start_editing=start_editing
        />
    };

    changes.publish(&state.with_untracked(|s| s.product.snapshot()));

    view! {
        <tr class=move || state.with(|s| s.css_class())>
            {cells}
            <td class="in-app-product-actions">
                <Button
                    class="in-app-product-edit"
                    variant=ButtonVariant::Ghost
                    on_click=on_edit
                >
                    {icon("edit")}
                    " Edit"
                </Button>
                <Button
                    class="in-app-product-save"
                    disabled=saving
                    on_click=on_save
                >
                    {icon("save")}
                    " Save"
                </Button>
                <span class="in-app-product-error">
                    {move || state.with(|s| s.error.clone().unwrap_or_default())}
                </span>
            </td>
        </tr>
    }
    .into_any()
}
