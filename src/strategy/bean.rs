//! Named methods exposed by plain registered objects.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Declared type of a method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Any,
    Object,
    Array,
    String,
    Number,
    Bool,
}

impl ParamType {
    /// Whether an operand can be passed for this parameter. A missing or
    /// null operand fits any parameter.
    pub fn accepts(self, value: Option<&Value>) -> bool {
        let value = match value {
            None | Some(Value::Null) => return true,
            Some(v) => v,
        };
        match self {
            ParamType::Any => true,
            ParamType::Object => value.is_object(),
            ParamType::Array => value.is_array(),
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Bool => value.is_boolean(),
        }
    }
}

/// Runtime kind of an operand, used to memoize overload resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Absent,
    Null,
    Object,
    Array,
    String,
    Number,
    Bool,
}

impl OperandKind {
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => OperandKind::Absent,
            Some(Value::Null) => OperandKind::Null,
            Some(Value::Object(_)) => OperandKind::Object,
            Some(Value::Array(_)) => OperandKind::Array,
            Some(Value::String(_)) => OperandKind::String,
            Some(Value::Number(_)) => OperandKind::Number,
            Some(Value::Bool(_)) => OperandKind::Bool,
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperandKind::Absent => "absent",
            OperandKind::Null => "null",
            OperandKind::Object => "object",
            OperandKind::Array => "array",
            OperandKind::String => "string",
            OperandKind::Number => "number",
            OperandKind::Bool => "bool",
        };
        f.write_str(name)
    }
}

type BeanFn = dyn Fn(Option<Value>, Option<Value>) -> Result<Value, String> + Send + Sync;

/// A callable two-operand method.
#[derive(Clone)]
pub struct MethodHandle {
    name: String,
    params: [ParamType; 2],
    call: Arc<BeanFn>,
}

impl MethodHandle {
    pub fn new<F>(name: impl Into<String>, params: [ParamType; 2], call: F) -> Self
    where
        F: Fn(Option<Value>, Option<Value>) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params,
            call: Arc::new(call),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> [ParamType; 2] {
        self.params
    }

    pub fn accepts(&self, old: Option<&Value>, new: Option<&Value>) -> bool {
        self.params[0].accepts(old) && self.params[1].accepts(new)
    }

    pub fn invoke(&self, old: Option<Value>, new: Option<Value>) -> Result<Value, String> {
        (self.call)(old, new)
    }
}

impl fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodHandle")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

/// Methods of one object, overloads kept in declaration order.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    methods: Vec<MethodHandle>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, handle: MethodHandle) {
        self.methods.push(handle);
    }

    pub fn overloads<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodHandle> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// Distinct method names, sorted.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.iter().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_fits_every_param_type() {
        for param in [
            ParamType::Any,
            ParamType::Object,
            ParamType::Array,
            ParamType::String,
            ParamType::Number,
            ParamType::Bool,
        ] {
            assert!(param.accepts(None));
            assert!(param.accepts(Some(&Value::Null)));
        }
    }

    #[test]
    fn test_param_type_checks_value_kind() {
        assert!(ParamType::Object.accepts(Some(&json!({"a": 1}))));
        assert!(!ParamType::Object.accepts(Some(&json!([1]))));
        assert!(ParamType::Number.accepts(Some(&json!(1.5))));
        assert!(!ParamType::String.accepts(Some(&json!(1))));
        assert!(ParamType::Any.accepts(Some(&json!(true))));
    }

    #[test]
    fn test_operand_kind() {
        assert_eq!(OperandKind::of(None), OperandKind::Absent);
        assert_eq!(OperandKind::of(Some(&Value::Null)), OperandKind::Null);
        assert_eq!(OperandKind::of(Some(&json!("x"))), OperandKind::String);
        assert_eq!(OperandKind::Object.to_string(), "object");
    }

    #[test]
    fn test_table_overloads_and_names() {
        let mut table = MethodTable::new();
        table.add(MethodHandle::new("merge", [ParamType::String, ParamType::String], |_, _| {
            Ok(json!("s"))
        }));
        table.add(MethodHandle::new("merge", [ParamType::Number, ParamType::Number], |_, _| {
            Ok(json!(0))
        }));
        table.add(MethodHandle::new("audit", [ParamType::Any, ParamType::Any], |_, _| {
            Ok(Value::Null)
        }));
        assert_eq!(table.len(), 3);
        assert_eq!(table.overloads("merge").count(), 2);
        assert_eq!(table.method_names(), vec!["audit", "merge"]);

        let numeric = table
            .overloads("merge")
            .find(|m| m.accepts(Some(&json!(1)), Some(&json!(2))))
            .unwrap();
        assert_eq!(numeric.params(), [ParamType::Number, ParamType::Number]);
    }
}
