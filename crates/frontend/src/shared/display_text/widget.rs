use super::formatter::{DisplayState, Formatted, Formatter};
use crate::shared::event_bus::{EventBus, Subscription};
use contracts::domain::a001_in_app_product::{FieldValue, ProductField, Snapshot};
use leptos::prelude::*;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Drives a deferred format to completion.
pub type Spawn = Rc<dyn Fn(Pin<Box<dyn Future<Output = ()>>>)>;

/// Render `field` of every snapshot published on `source`.
///
/// Deferred formats are handed to `spawn` and awaited off the event path;
/// the newest value always wins.
pub fn bind_display(
    source: &EventBus<Snapshot>,
    field: ProductField,
    formatter: Formatter,
    state: RwSignal<DisplayState>,
    spawn: Spawn,
) -> Subscription {
    source.subscribe(move |snapshot: &Snapshot| {
        let value = snapshot.get(&field).cloned().unwrap_or(FieldValue::Missing);
        let Some(ticket) = state.try_update(|s| s.begin()) else {
            return;
        };
        match formatter(&value) {
            Formatted::Ready(text) => {
                state.update(|s| {
                    s.resolve(ticket, text);
                });
            }
            Formatted::Deferred(fut) => spawn(Box::pin(async move {
                let text = fut.await;
                // Строка могла быть удалена, пока шло форматирование
                let _ = state.try_update(|s| s.resolve(ticket, text));
            })),
        }
    })
}

#[component]
pub fn DisplayText(
    source: EventBus<Snapshot>,
    field: ProductField,
    formatter: Formatter,
    /// Extra CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let state = RwSignal::new(DisplayState::default());
    let subscription = bind_display(
        &source,
        field,
        formatter,
        state,
        Rc::new(|fut: Pin<Box<dyn Future<Output = ()>>>| {
            wasm_bindgen_futures::spawn_local(fut)
        }),
    );

    let source = StoredValue::new_local(source);
    on_cleanup(move || {
        if let Some(source) = source.try_get_value() {
            source.unsubscribe(subscription);
        }
    });

    view! {
        <span class=move || format!("inline-view {}", class.get().unwrap_or_default())>
            {move || state.with(|s| s.text.clone())}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Pending = Rc<RefCell<Vec<Pin<Box<dyn Future<Output = ()>>>>>>;

    fn queue() -> (Spawn, Pending) {
        let pending: Pending = Rc::default();
        let sink = Rc::clone(&pending);
        let spawn: Spawn = Rc::new(move |fut: Pin<Box<dyn Future<Output = ()>>>| {
            sink.borrow_mut().push(fut)
        });
        (spawn, pending)
    }

    fn run_pending(pending: &Pending) {
        let queued: Vec<_> = pending.borrow_mut().drain(..).collect();
        for fut in queued {
            futures::executor::block_on(fut);
        }
    }

    /// Price ids starting with "slow" are looked up asynchronously.
    fn lookup_formatter() -> Formatter {
        Rc::new(|value: &FieldValue| {
            let text = value.display();
            if text.starts_with("slow") {
                Formatted::Deferred(Box::pin(async move { format!("{} (looked up)", text) }))
            } else {
                Formatted::Ready(text)
            }
        })
    }

    fn price(id: &str) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert(ProductField::PriceId, FieldValue::text(id));
        snapshot
    }

    fn shown(state: RwSignal<DisplayState>) -> String {
        state.with_untracked(|s| s.text.clone())
    }

    #[test]
    fn test_deferred_format_renders_when_resolved() {
        let owner = Owner::new();
        owner.set();
        let source = EventBus::<Snapshot>::new();
        let state = RwSignal::new(DisplayState::default());
        let (spawn, pending) = queue();
        bind_display(&source, ProductField::PriceId, lookup_formatter(), state, spawn);

        source.publish(&price("slow-1"));
        assert_eq!(shown(state), "");

        run_pending(&pending);
        assert_eq!(shown(state), "slow-1 (looked up)");
    }

    #[test]
    fn test_newer_value_beats_slow_format() {
        let owner = Owner::new();
        owner.set();
        let source = EventBus::<Snapshot>::new();
        let state = RwSignal::new(DisplayState::default());
        let (spawn, pending) = queue();
        bind_display(&source, ProductField::PriceId, lookup_formatter(), state, spawn);

        source.publish(&price("slow-1"));
        source.publish(&price("2"));
        assert_eq!(shown(state), "2");

        run_pending(&pending);
        assert_eq!(shown(state), "2");
    }

    #[test]
    fn test_missing_field_renders_blank() {
        let owner = Owner::new();
        owner.set();
        let source = EventBus::<Snapshot>::new();
        let state = RwSignal::new(DisplayState::default());
        let (spawn, _pending) = queue();
        bind_display(&source, ProductField::Guid, lookup_formatter(), state, spawn);

        source.publish(&price("1"));
        assert_eq!(shown(state), "");
    }
}
