//! WASM bindings for figgen.
//!
//! Lets a plugin UI run the generator in the browser. Both entry points
//! return a JS object `{ markup, css }` or throw on error.

use figgen_codegen::{CompilerOutput, GeneratorConfig, Target};
use figgen_model::DesignNode;
use wasm_bindgen::prelude::*;

/// Generate markup + CSS from a JSON-encoded design tree.
///
/// `target` is `"html"` or `"react"`.
#[wasm_bindgen]
pub fn generate(json: &str, target: &str) -> Result<JsValue, JsError> {
    let tree = DesignNode::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
    let target: Target = target.parse().map_err(|e: figgen_codegen::CodegenError| JsError::new(&e.to_string()))?;
    let output = native_generate(&tree, &GeneratorConfig::new(target))?;
    to_js(&output)
}

/// Generate markup + CSS from a design tree built as a JS object.
///
/// `options` is an optional generator config object
/// (`{ target, prefix, defaultIcon, defaultImage, variableMarker, customMarker }`).
#[wasm_bindgen(js_name = generateTree)]
pub fn generate_tree(tree: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let tree: DesignNode =
        serde_wasm_bindgen::from_value(tree).map_err(|e| JsError::new(&e.to_string()))?;
    let config: GeneratorConfig = if options.is_undefined() || options.is_null() {
        GeneratorConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))?
    };
    let output = native_generate(&tree, &config)?;
    to_js(&output)
}

/// Get the generator version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn native_generate(tree: &DesignNode, config: &GeneratorConfig) -> Result<CompilerOutput, JsError> {
    figgen_codegen::compile(tree, config).map_err(|e| JsError::new(&e.to_string()))
}

fn to_js(output: &CompilerOutput) -> Result<JsValue, JsError> {
    // Plain JS object { markup, css }
    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"markup".into(), &output.markup.as_str().into())
        .map_err(|_| JsError::new("Failed to set markup property"))?;
    js_sys::Reflect::set(&js_obj, &"css".into(), &output.css.as_str().into())
        .map_err(|_| JsError::new("Failed to set css property"))?;
    Ok(js_obj.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM): run the generate pipeline without a JS host
    // =========================================================================

    fn native(json: &str, target: Target) -> CompilerOutput {
        let tree = DesignNode::from_json(json).unwrap();
        figgen_codegen::compile(&tree, &GeneratorConfig::new(target)).unwrap()
    }

    #[test]
    fn test_text_node() {
        let output = native(r#"{"type":"TEXT","name":"t","id":"2","text":"Hello"}"#, Target::Html);
        assert_eq!(output.markup, "<p id=\"text-2\" class=\"t\">Hello</p>");
        assert_eq!(output.css, "");
    }

    #[test]
    fn test_plugin_export() {
        let output = native(
            r#"{"type":"FRAME","name":"Form","id":"1:1","children":[
                {"type":"INSTANCE","name":"Input","id":"1:2","variantProperties":{"component":"input","Size":"def-size-small"},
                 "css":{"width":"100%"},
                 "children":[
                    {"type":"TEXT","name":"Label","id":"1:3","text":"Email"},
                    {"type":"TEXT","name":"Placeholder","id":"1:4","text":"you@example.com"}
                 ]},
                {"type":"INSTANCE","name":"Button","id":"1:5","variantProperties":{"component":"button"},
                 "componentProperties":{"Disabled#3:0":{"type":"BOOLEAN","value":true}},
                 "children":[{"type":"TEXT","name":"Text","id":"1:6","text":"Send"}]}
            ]}"#,
            Target::React,
        );
        assert_eq!(
            output.markup,
            "<div id=\"frame-1-1\" className=\"form\">\
             <DBInput id=\"instance-1-2\" className=\"input\" label=\"Email\" placeholder=\"you@example.com\" size=\"small\" />\n\
             <DBButton id=\"instance-1-5\" className=\"button\" disabled>Send</DBButton>\
             </div>"
        );
        assert_eq!(output.css, ".input {\n  width: 100%;\n}\n");
    }

    #[test]
    fn test_unknown_target() {
        assert!("svelte".parse::<Target>().is_err());
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }

    #[test]
    fn test_multiple_generates() {
        // No state carried between calls
        let json = r#"{"type":"INSTANCE","name":"b","id":"1","variantProperties":{"component":"button"},
            "children":[{"type":"TEXT","name":"t","id":"2","text":"Go"}]}"#;
        let first = native(json, Target::Html);
        let second = native(json, Target::Html);
        assert_eq!(first, second);
    }
}
