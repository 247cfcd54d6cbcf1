//! Parameter storage types
//!
//! A small fixed-capacity key/value store for the configuration surface.
//! Values are written once at startup by the loading collaborator and read
//! when the immutable configuration aggregate is built.

use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters (must be a power of two)
pub const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter cannot be modified once registered
        const READ_ONLY = 0b00000001;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl ParamValue {
    /// Interpret the value as a float, the common case for gains and limits.
    pub fn as_f32(&self) -> f32 {
        match self {
            ParamValue::Bool(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::Int(v) => *v as f32,
            ParamValue::Float(v) => *v,
        }
    }

    /// Interpret the value as an integer.
    pub fn as_i32(&self) -> i32 {
        match self {
            ParamValue::Bool(v) => *v as i32,
            ParamValue::Int(v) => *v,
            ParamValue::Float(v) => *v as i32,
        }
    }

    /// Interpret the value as a boolean (non-zero is true).
    pub fn as_bool(&self) -> bool {
        match self {
            ParamValue::Bool(v) => *v,
            ParamValue::Int(v) => *v != 0,
            ParamValue::Float(v) => *v != 0.0,
        }
    }
}

/// Fixed-capacity parameter store.
pub struct ParameterStore {
    values: FnvIndexMap<String<PARAM_NAME_LEN>, ParamValue, MAX_PARAMS>,
    flags: FnvIndexMap<String<PARAM_NAME_LEN>, ParamFlags, MAX_PARAMS>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self {
            values: FnvIndexMap::new(),
            flags: FnvIndexMap::new(),
        }
    }

    fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, super::ParameterError> {
        let mut key = String::new();
        key.push_str(name)
            .map_err(|_| super::ParameterError::UnknownParameter)?;
        Ok(key)
    }

    /// Get a parameter value.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = Self::key(name).ok()?;
        self.values.get(&key)
    }

    /// Register a parameter with its default value and flags.
    ///
    /// Idempotent: re-registering an existing parameter keeps its value.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), super::ParameterError> {
        let key = Self::key(name)?;
        if self.values.contains_key(&key) {
            return Ok(());
        }
        self.values
            .insert(key.clone(), default_value)
            .map_err(|_| super::ParameterError::StoreFull)?;
        self.flags
            .insert(key, flags)
            .map_err(|_| super::ParameterError::StoreFull)?;
        Ok(())
    }

    /// Overwrite a registered parameter (the startup load path).
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), super::ParameterError> {
        let key = Self::key(name)?;
        if !self.values.contains_key(&key) {
            return Err(super::ParameterError::UnknownParameter);
        }
        if let Some(flags) = self.flags.get(&key) {
            if flags.contains(ParamFlags::READ_ONLY) {
                return Err(super::ParameterError::ReadOnly);
            }
        }
        self.values.insert(key, value).ok();
        Ok(())
    }

    /// Number of registered parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all registered parameter names.
    pub fn iter_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
