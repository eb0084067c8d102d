//! Destinations accepted by [`Generator::set_new_id`](crate::Generator::set_new_id).

use std::any::Any;
use std::sync::{Arc, Mutex, PoisonError};

/// A location that can receive a string value.
pub trait SettableField {
    fn set_string(&mut self, value: String);
}

impl SettableField for String {
    fn set_string(&mut self, value: String) {
        *self = value;
    }
}

impl SettableField for Option<String> {
    fn set_string(&mut self, value: String) {
        *self = Some(value);
    }
}

/// Shared handle to a string owned elsewhere.
impl SettableField for Arc<Mutex<String>> {
    fn set_string(&mut self, value: String) {
        *self.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl SettableField for Box<dyn SettableField> {
    fn set_string(&mut self, value: String) {
        (**self).set_string(value);
    }
}

impl SettableField for Box<dyn SettableField + Send> {
    fn set_string(&mut self, value: String) {
        (**self).set_string(value);
    }
}

/// Resolve a dynamically typed target to one of the supported field kinds.
pub(crate) fn resolve(target: &mut dyn Any) -> Option<&mut dyn SettableField> {
    if target.is::<String>() {
        return target.downcast_mut::<String>().map(|t| t as &mut dyn SettableField);
    }
    if target.is::<Option<String>>() {
        return target
            .downcast_mut::<Option<String>>()
            .map(|t| t as &mut dyn SettableField);
    }
    if target.is::<Arc<Mutex<String>>>() {
        return target
            .downcast_mut::<Arc<Mutex<String>>>()
            .map(|t| t as &mut dyn SettableField);
    }
    if target.is::<Box<dyn SettableField>>() {
        return target
            .downcast_mut::<Box<dyn SettableField>>()
            .map(|t| t as &mut dyn SettableField);
    }
    target
        .downcast_mut::<Box<dyn SettableField + Send>>()
        .map(|t| t as &mut dyn SettableField)
}
