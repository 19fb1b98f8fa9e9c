use super::*;

#[test]
fn defaults() {
    let config = FormatConfig::default();
    assert_eq!(config.indent_width, 4);
    assert_eq!(config.write_capacity, 64);
    assert_eq!(config.read_capacity, 8);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn builders_override_fields() {
    let config = FormatConfig::new()
        .with_indent_width(2)
        .with_write_capacity(16)
        .with_read_capacity(1);
    assert_eq!(config.indent_width, 2);
    assert_eq!(config.write_capacity, 16);
    assert_eq!(config.read_capacity, 1);
}

#[test]
fn zero_indent_width_is_rejected() {
    let config = FormatConfig::new().with_indent_width(0);
    assert_eq!(config.validate(), Err(ConfigError::ZeroIndentWidth));
}

#[test]
fn zero_capacities_are_rejected() {
    assert_eq!(
        FormatConfig::new().with_write_capacity(0).validate(),
        Err(ConfigError::ZeroWriteCapacity)
    );
    assert_eq!(
        FormatConfig::new().with_read_capacity(0).validate(),
        Err(ConfigError::ZeroReadCapacity)
    );
}
