//! Offline WGSL checking.
//!
//! wgpu reports shader errors through the device's uncaptured-error handler,
//! which aborts by default. Running the source through naga first turns a
//! bad shader into a [`RenderError`] the caller can degrade on.

use super::RenderError;

/// Parses and validates `source`.
///
/// Parse errors become [`RenderError::ShaderCompile`], validation errors
/// [`RenderError::ProgramLink`]. Both carry the diagnostic text.
pub fn validate_wgsl(label: &str, source: &str) -> Result<(), RenderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| {
        let log = e.emit_to_string(source);
        log::error!("{label}: WGSL parse failed\n{log}");
        RenderError::ShaderCompile { log }
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| {
        let log = e.to_string();
        log::error!("{label}: WGSL validation failed: {log}");
        RenderError::ProgramLink { log }
    })?;

    log::debug!("{label}: WGSL validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_is_a_compile_error() {
        let err = validate_wgsl("broken", "fn main( {").unwrap_err();
        assert!(matches!(err, RenderError::ShaderCompile { .. }));
    }

    #[test]
    fn missing_position_is_a_link_error() {
        // Parses, but a vertex stage must write a clip position.
        let src = "@vertex fn vs() -> @location(0) vec4<f32> { return vec4<f32>(0.0); }";
        let err = validate_wgsl("mistyped", src).unwrap_err();
        assert!(matches!(err, RenderError::ProgramLink { .. }), "{err}");
    }

    #[test]
    fn minimal_module_passes() {
        validate_wgsl("ok", "fn f() -> f32 { return 1.0; }").unwrap();
    }
}
