use super::events::FieldCommand;
use contracts::domain::a001_in_app_product::{FieldErrors, ProductField};
use leptos::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type FieldHandle = Callback<FieldCommand>;

/// Field name -> widget handle, used to deliver server validation errors and
/// programmatic value updates to the right widget.
#[derive(Clone, Default)]
pub struct FieldRegistry {
    handles: Rc<RefCell<HashMap<ProductField, FieldHandle>>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, field: ProductField, handle: FieldHandle) {
        if self.handles.borrow_mut().insert(field, handle).is_some() {
            log::warn!("widget for {} registered twice, keeping the last one", field);
        }
    }

    /// Send `command` to the widget of `field`. Returns `false` when nothing
    /// is registered for it.
    pub fn send(&self, field: ProductField, command: FieldCommand) -> bool {
        // Handle is copied out so it may re-enter the registry
        let handle = self.handles.borrow().get(&field).copied();
        match handle {
            Some(handle) => {
                handle.run(command);
                true
            }
            None => false,
        }
    }

    /// Deliver each field's messages to its widget. Messages for unknown or
    /// unregistered fields are returned for row-level display.
    pub fn route_errors(&self, errors: &FieldErrors) -> Vec<String> {
        let mut keys: Vec<&String> = errors.keys().collect();
        keys.sort();

        let mut unrouted = Vec::new();
        for key in keys {
            let messages = &errors[key];
            if messages.is_empty() {
                continue;
            }
            let delivered = key
                .parse::<ProductField>()
                .map(|field| self.send(field, FieldCommand::ShowErrors(messages.clone())))
                .unwrap_or(false);
            if !delivered {
                log::warn!("no widget for field error {}: {:?}", key, messages);
                unrouted.extend(messages.iter().take(1).cloned());
            }
        }
        unrouted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<FieldCommand>>>;

    fn recorder(registry: &FieldRegistry, field: ProductField) -> Seen {
        let seen: Seen = Arc::default();
        let log = Arc::clone(&seen);
        registry.register(
            field,
            Callback::new(move |cmd: FieldCommand| log.lock().unwrap().push(cmd)),
        );
        seen
    }

    #[test]
    fn test_route_errors_to_registered_field_only() {
        let registry = FieldRegistry::new();
        let name = recorder(&registry, ProductField::Name);
        let price = recorder(&registry, ProductField::PriceId);

        let mut errors = FieldErrors::new();
        errors.insert("name".to_string(), vec!["Too long".to_string()]);
        let unrouted = registry.route_errors(&errors);

        assert!(unrouted.is_empty());
        assert_eq!(
            *name.lock().unwrap(),
            vec![FieldCommand::ShowErrors(vec!["Too long".to_string()])]
        );
        assert!(price.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_fields_are_returned() {
        let registry = FieldRegistry::new();
        let _name = recorder(&registry, ProductField::Name);

        let mut errors = FieldErrors::new();
        errors.insert(
            "default_locale".to_string(),
            vec!["Bad locale".to_string(), "Second".to_string()],
        );
        errors.insert("guid".to_string(), vec!["Immutable".to_string()]);
        let unrouted = registry.route_errors(&errors);

        assert_eq!(unrouted, vec!["Bad locale".to_string(), "Immutable".to_string()]);
    }

    #[test]
    fn test_send_to_missing_field() {
        let registry = FieldRegistry::new();
        assert!(!registry.send(ProductField::Active, FieldCommand::SetValue(Default::default())));
    }

    #[test]
    fn test_later_registration_replaces_handle() {
        let registry = FieldRegistry::new();
        let first = recorder(&registry, ProductField::Name);
        let second = recorder(&registry, ProductField::Name);

        assert!(registry.send(ProductField::Name, FieldCommand::ShowErrors(vec![])));
        assert!(first.lock().unwrap().is_empty());
        assert_eq!(second.lock().unwrap().len(), 1);
    }
}
