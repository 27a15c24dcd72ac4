use super::ParamLocation;

/// A flat, wire-ready request parameter.
///
/// Parameters are only created by the [`ParameterBuilder`](super::ParameterBuilder)
/// and are immutable afterwards. The value is already serialized: body
/// parameters hold the encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value: String,
    location: ParamLocation,
}

impl Parameter {
    pub(in crate::client) fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        location: ParamLocation,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            location,
        }
    }

    /// The wire-visible name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The serialized value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Where the parameter goes.
    pub fn location(&self) -> ParamLocation {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_fields() {
        let param = Parameter::new("id", "42", ParamLocation::Path);

        assert_eq!(param.name(), "id");
        assert_eq!(param.value(), "42");
        assert_eq!(param.location(), ParamLocation::Path);
    }
}
