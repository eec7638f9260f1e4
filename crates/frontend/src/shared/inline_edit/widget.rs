use super::events::{EditEvent, FieldCommand};
use super::extractor::{FieldInput, InputKind};
use super::registry::FieldRegistry;
use super::state::{FieldSeed, InlineEditState};
use crate::shared::display_text::{identity_formatter, DisplayText, Formatter};
use crate::shared::event_bus::EventBus;
use contracts::domain::a001_in_app_product::{FieldValue, ProductField, Snapshot};
use leptos::prelude::*;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::Element;

/// One editable attribute of a row.
///
/// Listens for `StartEdit`/`DoneEdit` on the row bus, publishes
/// `ValueChanged` when the extracted input value changes, and registers
/// itself so the row can deliver field errors and value updates.
#[component]
pub fn InlineEditField(
    field: ProductField,
    /// Base CSS class of the cell
    #[prop(into)]
    class: String,
    input: FieldInput,
    seed: FieldSeed,
    bus: EventBus<EditEvent>,
    registry: FieldRegistry,
    #[prop(optional)] formatter: Option<Formatter>,
    #[prop(optional)] start_editing: bool,
) -> impl IntoView {
    let state = RwSignal::new(InlineEditState::new(field));
    let data = EventBus::<Snapshot>::new();
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let select_ref = NodeRef::<leptos::html::Select>::new();

    let bus_sv = StoredValue::new_local(bus.clone());
    let data_sv = StoredValue::new_local(data.clone());

    let commit = Callback::new(move |value: FieldValue| {
        let change = state.try_update(|s| s.apply_input(value)).flatten();
        if let Some(change) = change {
            bus_sv.get_value().publish(&EditEvent::ValueChanged {
                field: change.field,
                value: change.value,
            });
            data_sv.get_value().publish(&change.snapshot);
        }
    });

    let focus = move || {
        if let Some(el) = input_ref.get_untracked() {
            let _ = el.focus();
        } else if let Some(el) = select_ref.get_untracked() {
            let _ = el.focus();
        }
    };

    let subscription = bus.subscribe(move |event: &EditEvent| match event {
        EditEvent::StartEdit => {
            state.update(|s| s.start_edit());
            focus();
        }
        EditEvent::DoneEdit => state.update(|s| s.done_edit()),
        _ => {}
    });
    on_cleanup(move || {
        if let Some(bus) = bus_sv.try_get_value() {
            bus.unsubscribe(subscription);
        }
    });

    registry.register(
        field,
        Callback::new(move |command: FieldCommand| match command {
            FieldCommand::ShowErrors(errors) => state.update(|s| s.show_errors(&errors)),
            FieldCommand::SetValue(value) => commit.run(value),
        }),
    );

    let on_value: Rc<dyn Fn(leptos::ev::Event)> = {
        let extractor = Rc::clone(&input.extractor);
        Rc::new(move |ev: leptos::ev::Event| {
            let Some(element) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            commit.run(extractor.extract(&element));
        })
    };

    let input_view = match input.kind {
        InputKind::Text => {
            let on_input = Rc::clone(&on_value);
            let on_change = Rc::clone(&on_value);
            view! {
                <input
                    type="text"
                    node_ref=input_ref
                    prop:value=move || state.with(|s| s.current().display())
                    on:input=move |ev| on_input(ev)
                    on:change=move |ev| on_change(ev)
                />
            }
            .into_any()
        }
        InputKind::Checkbox => {
            let on_change = Rc::clone(&on_value);
            view! {
                <input
                    type="checkbox"
                    node_ref=input_ref
                    prop:checked=move || state.with(|s| s.current().as_flag().unwrap_or(false))
                    on:change=move |ev| on_change(ev)
                />
            }
            .into_any()
        }
        InputKind::Select(options) => {
            let on_change = Rc::clone(&on_value);
            view! {
                <select
                    node_ref=select_ref
                    prop:value=move || state.with(|s| s.current().display())
                    on:change=move |ev| on_change(ev)
                >
                    {options
                        .into_iter()
                        .map(|(value, label)| {
                            let option_value = value.clone();
                            let is_selected = move || {
                                state.with(|s| s.current().as_text() == Some(option_value.as_str()))
                            };
                            view! { <option value=value selected=is_selected>{label}</option> }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
    };

    // DisplayText must be subscribed before the initial value is published
    let display = view! {
        <DisplayText
            source=data.clone()
            field=field
            formatter=formatter.unwrap_or_else(identity_formatter)
        />
    };

    commit.run(seed.resolve());

    if start_editing {
        state.update(|s| s.start_edit());
        // Фокус после монтирования input
        Effect::new(move |_| {
            if input_ref.get().is_some() || select_ref.get().is_some() {
                focus();
            }
        });
    }

    view! {
        <td class=move || state.with(|s| s.css_class(&class))>
            {display}
            {input_view}
            <span class="field-error">
                {move || state.with(|s| s.error.clone().unwrap_or_default())}
            </span>
        </td>
    }
}
