//! Built-in layers
//!
//! Declaration order here is not composition order; the compositor sorts
//! by stage. Rule directives are opaque to this crate and passed through to
//! the lint engine verbatim.

use lintlayer_model::{FieldValue, Layer, ProjectType, Stage};
use serde_json::{json, Value};

use super::{Catalogue, CatalogueError};

/// Sources governed by the common house style
pub const SCRIPT_SOURCES: &[&str] = &[
    "**/*.js", "**/*.mjs", "**/*.cjs", "**/*.jsx", "**/*.ts", "**/*.tsx",
];

/// TypeScript sources
pub const TYPESCRIPT_SOURCES: &[&str] = &["**/*.ts", "**/*.tsx"];

/// JSX sources, shared by the React and React Native overlays
pub const JSX_SOURCES: &[&str] = &["**/*.jsx", "**/*.tsx"];

/// Vue single-file components
pub const VUE_SOURCES: &[&str] = &["**/*.vue"];

const GLOBAL_IGNORES: &[&str] = &[
    "*.md",
    "node_modules/",
    "*.json",
    ".history",
    "dist/",
    "build/",
    ".next/",
    "coverage/",
    "android/",
    "ios/",
    ".expo/",
];

const RECOMMENDED_RULES: &[&str] = &[
    "constructor-super",
    "for-direction",
    "getter-return",
    "no-async-promise-executor",
    "no-case-declarations",
    "no-class-assign",
    "no-compare-neg-zero",
    "no-cond-assign",
    "no-const-assign",
    "no-constant-binary-expression",
    "no-constant-condition",
    "no-control-regex",
    "no-debugger",
    "no-delete-var",
    "no-dupe-args",
    "no-dupe-class-members",
    "no-dupe-else-if",
    "no-dupe-keys",
    "no-duplicate-case",
    "no-empty",
    "no-empty-character-class",
    "no-empty-pattern",
    "no-empty-static-block",
    "no-ex-assign",
    "no-extra-boolean-cast",
    "no-fallthrough",
    "no-func-assign",
    "no-global-assign",
    "no-import-assign",
    "no-invalid-regexp",
    "no-irregular-whitespace",
    "no-loss-of-precision",
    "no-misleading-character-class",
    "no-new-native-nonconstructor",
    "no-nonoctal-decimal-escape",
    "no-obj-calls",
    "no-octal",
    "no-prototype-builtins",
    "no-redeclare",
    "no-regex-spaces",
    "no-self-assign",
    "no-setter-return",
    "no-shadow-restricted-names",
    "no-sparse-arrays",
    "no-this-before-super",
    "no-undef",
    "no-unexpected-multiline",
    "no-unreachable",
    "no-unsafe-finally",
    "no-unsafe-negation",
    "no-unsafe-optional-chaining",
    "no-unused-labels",
    "no-unused-private-class-members",
    "no-unused-vars",
    "no-useless-backreference",
    "no-useless-catch",
    "no-useless-escape",
    "no-with",
    "require-yield",
    "use-isnan",
    "valid-typeof",
];

const BROWSER_GLOBALS: &[&str] = &[
    "AbortController",
    "Blob",
    "CustomEvent",
    "Event",
    "File",
    "FileReader",
    "Headers",
    "HTMLElement",
    "Image",
    "IntersectionObserver",
    "MutationObserver",
    "Request",
    "Response",
    "URL",
    "URLSearchParams",
    "WebSocket",
    "alert",
    "cancelAnimationFrame",
    "clearInterval",
    "clearTimeout",
    "console",
    "document",
    "fetch",
    "history",
    "localStorage",
    "location",
    "navigator",
    "requestAnimationFrame",
    "sessionStorage",
    "setInterval",
    "setTimeout",
    "window",
];

const NODE_GLOBALS: &[&str] = &[
    "Buffer",
    "__dirname",
    "__filename",
    "clearImmediate",
    "exports",
    "global",
    "module",
    "process",
    "require",
    "setImmediate",
];

/// Load and validate the built-in catalogue
pub(super) fn load() -> Result<Catalogue, CatalogueError> {
    Catalogue::new(vec![
        global_ignores()?,
        recommended()?,
        common()?,
        vue()?,
        react()?,
        react_native()?,
        typescript()?,
    ])
}

fn global_ignores() -> Result<Layer, CatalogueError> {
    Ok(Layer::builder("base/ignores", Stage::Base)
        .field("ignores", FieldValue::strings(GLOBAL_IGNORES.iter().copied()))
        .build()?)
}

fn recommended() -> Result<Layer, CatalogueError> {
    Ok(Layer::builder("base/recommended", Stage::Base)
        .scope(SCRIPT_SOURCES.iter().copied())
        .field(
            "rules",
            FieldValue::mapping(recommended_rules()),
        )
        .build()?)
}

fn common() -> Result<Layer, CatalogueError> {
    Ok(Layer::builder("base/common", Stage::Base)
        .scope(SCRIPT_SOURCES.iter().copied())
        .field("plugins", FieldValue::mapping([("import", json!("eslint-plugin-import"))]))
        .scalar("ecmaVersion", json!(2022))
        .scalar("sourceType", json!("module"))
        .field(
            "parserOptions",
            FieldValue::mapping([("ecmaFeatures", json!({"jsx": true}))]),
        )
        .field("globals", FieldValue::mapping(common_globals()))
        .field("rules", FieldValue::mapping(common_rules()))
        .build()?)
}

fn vue() -> Result<Layer, CatalogueError> {
    // Single-file components sit outside the script scope, so they carry
    // the recommended and house rules themselves.
    let mut rules = recommended_rules();
    rules.extend(common_rules());
    rules.extend([
        ("vue/multi-word-component-names", json!("off")),
        ("vue/no-v-html", json!("warn")),
        ("vue/require-default-prop", json!("off")),
        ("vue/require-explicit-emits", json!("error")),
        (
            "vue/component-name-in-template-casing",
            json!(["error", "PascalCase"]),
        ),
    ]);

    Ok(Layer::builder("framework/vue", Stage::Framework)
        .scope(VUE_SOURCES.iter().copied())
        .only([ProjectType::Vue])
        .field(
            "plugins",
            FieldValue::mapping([
                ("vue", json!("eslint-plugin-vue")),
                ("import", json!("eslint-plugin-import")),
            ]),
        )
        .scalar("parser", json!("vue-eslint-parser"))
        .field("parserOptions", module_parser_options(false))
        .field("globals", FieldValue::mapping(common_globals()))
        .field("rules", FieldValue::mapping(rules))
        .build()?)
}

fn react() -> Result<Layer, CatalogueError> {
    let mut rules = common_rules();
    rules.extend([
        ("react/display-name", json!("error")),
        ("react/jsx-key", json!("error")),
        ("react/jsx-no-comment-textnodes", json!("error")),
        ("react/jsx-no-duplicate-props", json!("error")),
        ("react/jsx-no-target-blank", json!("error")),
        ("react/jsx-no-undef", json!("error")),
        ("react/jsx-uses-react", json!("error")),
        ("react/jsx-uses-vars", json!("error")),
        ("react/no-children-prop", json!("error")),
        ("react/no-danger-with-children", json!("error")),
        ("react/no-deprecated", json!("error")),
        ("react/no-direct-mutation-state", json!("error")),
        ("react/no-find-dom-node", json!("error")),
        ("react/no-is-mounted", json!("error")),
        ("react/no-render-return-value", json!("error")),
        ("react/no-string-refs", json!("error")),
        ("react/no-unescaped-entities", json!("error")),
        ("react/no-unknown-property", json!("error")),
        ("react/require-render-return", json!("error")),
        ("react/react-in-jsx-scope", json!("off")),
        ("react/prop-types", json!("off")),
        (
            "react/jsx-filename-extension",
            json!(["error", {"extensions": [".jsx", ".tsx"]}]),
        ),
        ("react-hooks/rules-of-hooks", json!("error")),
        ("react-hooks/exhaustive-deps", json!("warn")),
        (
            "no-unused-vars",
            json!(["error", {
                "vars": "all",
                "args": "after-used",
                "ignoreRestSiblings": true,
                "argsIgnorePattern": "^_",
                "varsIgnorePattern": "^_"
            }]),
        ),
        ("import/no-unused-modules", json!("warn")),
    ]);

    let mut globals = common_globals();
    globals.extend(framework_globals());

    Ok(Layer::builder("framework/react", Stage::Framework)
        .scope(JSX_SOURCES.iter().copied())
        .only([ProjectType::React, ProjectType::ReactNative])
        .field(
            "plugins",
            FieldValue::mapping([
                ("react", json!("eslint-plugin-react")),
                ("react-hooks", json!("eslint-plugin-react-hooks")),
                ("@typescript-eslint", json!("@typescript-eslint/eslint-plugin")),
                ("import", json!("eslint-plugin-import")),
            ]),
        )
        .scalar("parser", json!("@typescript-eslint/parser"))
        .field("parserOptions", module_parser_options(true))
        .field("globals", FieldValue::mapping(globals))
        .field("rules", FieldValue::mapping(rules))
        .field(
            "settings",
            FieldValue::mapping([
                ("react", json!({"version": "detect"})),
                (
                    "import/resolver",
                    json!({"node": {"extensions": [".js", ".jsx", ".ts", ".tsx"]}}),
                ),
            ]),
        )
        .build()?)
}

fn react_native() -> Result<Layer, CatalogueError> {
    Ok(Layer::builder("framework/react-native", Stage::Framework)
        .scope(JSX_SOURCES.iter().copied())
        .only([ProjectType::ReactNative])
        .field(
            "plugins",
            FieldValue::mapping([("react-native", json!("eslint-plugin-react-native"))]),
        )
        .field(
            "rules",
            FieldValue::mapping([
                ("react-native/no-unused-styles", json!("error")),
                ("react-native/no-inline-styles", json!("warn")),
                ("react-native/no-raw-text", json!("error")),
                ("react-native/split-platform-components", json!("warn")),
            ]),
        )
        .build()?)
}

fn typescript() -> Result<Layer, CatalogueError> {
    Ok(Layer::builder("language/typescript", Stage::Language)
        .scope(TYPESCRIPT_SOURCES.iter().copied())
        .only([
            ProjectType::Typescript,
            ProjectType::React,
            ProjectType::ReactNative,
            ProjectType::Vue,
        ])
        .field(
            "plugins",
            FieldValue::mapping([("@typescript-eslint", json!("@typescript-eslint/eslint-plugin"))]),
        )
        .scalar("parser", json!("@typescript-eslint/parser"))
        .field("parserOptions", module_parser_options(false))
        .field("globals", FieldValue::mapping(framework_globals()))
        .field(
            "rules",
            FieldValue::mapping([
                ("@typescript-eslint/ban-ts-comment", json!("error")),
                ("@typescript-eslint/no-array-constructor", json!("error")),
                ("@typescript-eslint/no-duplicate-enum-values", json!("error")),
                ("@typescript-eslint/no-empty-object-type", json!("error")),
                ("@typescript-eslint/no-misused-new", json!("error")),
                ("@typescript-eslint/no-namespace", json!("error")),
                ("@typescript-eslint/no-non-null-asserted-optional-chain", json!("error")),
                ("@typescript-eslint/no-require-imports", json!("error")),
                ("@typescript-eslint/no-this-alias", json!("error")),
                ("@typescript-eslint/no-unnecessary-type-constraint", json!("error")),
                ("@typescript-eslint/no-unsafe-declaration-merging", json!("error")),
                ("@typescript-eslint/no-unused-vars", json!("error")),
                ("@typescript-eslint/prefer-as-const", json!("error")),
                ("@typescript-eslint/triple-slash-reference", json!("error")),
                ("@typescript-eslint/explicit-function-return-type", json!("error")),
                ("@typescript-eslint/explicit-module-boundary-types", json!("error")),
                ("@typescript-eslint/no-explicit-any", json!("warn")),
            ]),
        )
        .build()?)
}

fn module_parser_options(jsx: bool) -> FieldValue {
    let mut options = vec![
        ("ecmaVersion", json!("latest")),
        ("sourceType", json!("module")),
    ];
    if jsx {
        options.push(("ecmaFeatures", json!({"jsx": true})));
    }
    FieldValue::mapping(options)
}

fn readonly<'a>(names: &'a [&'static str]) -> impl Iterator<Item = (&'static str, Value)> + 'a {
    names.iter().map(|name| (*name, json!("readonly")))
}

/// Browser and node globals plus the few the environment presets miss
fn common_globals() -> Vec<(&'static str, Value)> {
    readonly(BROWSER_GLOBALS)
        .chain(readonly(NODE_GLOBALS))
        .chain(readonly(&["FormData", "XMLHttpRequest", "Vue"]))
        .collect()
}

/// Globals injected by the React Native and TypeScript toolchains
fn framework_globals() -> Vec<(&'static str, Value)> {
    readonly(&["__DEV__", "fetch", "navigator"]).collect()
}

/// The engine's recommended core rules, all at error
fn recommended_rules() -> Vec<(&'static str, Value)> {
    RECOMMENDED_RULES.iter().map(|r| (*r, json!("error"))).collect()
}

/// House style rules shared by every script scope
fn common_rules() -> Vec<(&'static str, Value)> {
    vec![
        (
            "object-property-newline",
            json!(["error", {"allowAllPropertiesOnSameLine": false}]),
        ),
        (
            "object-curly-newline",
            json!(["error", {
                "ObjectExpression": {"multiline": true, "minProperties": 7},
                "ObjectPattern": {"multiline": true},
                "ImportDeclaration": {"multiline": true, "minProperties": 7},
                "ExportDeclaration": {"multiline": true, "minProperties": 7}
            }]),
        ),
        ("comma-style", json!(["error", "last"])),
        ("comma-dangle", json!(["error", "never"])),
        ("max-len", json!(["error", {"code": 160}])),
        (
            "padding-line-between-statements",
            json!([
                "error",
                {"blankLine": "always", "prev": "*", "next": "block"},
                {"blankLine": "always", "prev": "block", "next": "*"},
                {"blankLine": "always", "prev": "*", "next": "block-like"},
                {"blankLine": "always", "prev": "block-like", "next": "*"},
                {"blankLine": "always", "prev": "export", "next": "block"},
                {"blankLine": "always", "prev": "import", "next": "block"},
                {"blankLine": "always", "prev": "*", "next": "return"}
            ]),
        ),
        ("no-var", json!("error")),
        (
            "prefer-const",
            json!(["error", {"destructuring": "any", "ignoreReadBeforeAssign": false}]),
        ),
        ("import/no-duplicates", json!("error")),
        (
            "sort-imports",
            json!(["error", {
                "ignoreCase": false,
                "ignoreDeclarationSort": true,
                "ignoreMemberSort": false,
                "memberSyntaxSortOrder": ["none", "all", "multiple", "single"]
            }]),
        ),
        ("object-curly-spacing", json!(["error", "always"])),
        ("space-infix-ops", json!(["error", {"int32Hint": true}])),
        ("space-before-blocks", json!("error")),
        ("arrow-spacing", json!("error")),
        (
            "space-before-function-paren",
            json!(["error", {"anonymous": "never", "named": "never", "asyncArrow": "always"}]),
        ),
        ("arrow-parens", json!(["error", "always"])),
        ("no-dupe-keys", json!("off")),
        ("semi", json!(["error", "always"])),
        ("quotes", json!(["error", "single"])),
        ("indent", json!(["error", 3])),
        ("object-shorthand", json!(["error", "properties"])),
        ("no-param-reassign", json!("warn")),
        ("spaced-comment", json!("off")),
        ("no-console", json!("warn")),
        ("consistent-return", json!("off")),
        ("func-names", json!("off")),
        ("no-process-exit", json!("off")),
        ("no-return-await", json!("off")),
        ("no-underscore-dangle", json!("off")),
        ("class-methods-use-this", json!("off")),
        (
            "prefer-destructuring",
            json!(["error", {"object": true, "array": false}]),
        ),
        (
            "no-unused-vars",
            json!(["error", {
                "vars": "all",
                "args": "all",
                "caughtErrors": "all",
                "varsIgnorePattern": "^_",
                "argsIgnorePattern": "^_",
                "caughtErrorsIgnorePattern": "^_",
                "ignoreRestSiblings": true
            }]),
        ),
        (
            "camelcase",
            json!(["warn", {
                "allow": [
                    "shipping_number",
                    "wh_packed",
                    "is_printed",
                    "created_at",
                    "updated_at",
                    "user_id",
                    "station_id"
                ]
            }]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order() {
        let catalogue = load().unwrap();
        let names: Vec<&str> = catalogue.layers().iter().map(|l| l.name()).collect();
        assert_eq!(
            names,
            vec![
                "base/ignores",
                "base/recommended",
                "base/common",
                "framework/vue",
                "framework/react",
                "framework/react-native",
                "language/typescript",
            ]
        );
    }

    #[test]
    fn test_global_ignores_layer_is_scope_less() {
        let catalogue = load().unwrap();
        let ignores = catalogue.get("base/ignores").unwrap();
        assert!(ignores.is_global());
        let list = ignores.fields()["ignores"].as_sequence().unwrap();
        assert!(list.contains(&json!("node_modules/")));
        assert_eq!(list.len(), GLOBAL_IGNORES.len());
    }

    #[test]
    fn test_react_rules_override_common_unused_vars() {
        let catalogue = load().unwrap();
        let rules = catalogue.get("framework/react").unwrap().fields()["rules"]
            .as_mapping()
            .unwrap();
        assert_eq!(rules["no-unused-vars"][1]["args"], "after-used");
        assert_eq!(rules["quotes"], json!(["error", "single"]));
    }

    #[test]
    fn test_react_native_shares_react_scope() {
        let catalogue = load().unwrap();
        assert_eq!(
            catalogue.get("framework/react").unwrap().scope(),
            catalogue.get("framework/react-native").unwrap().scope()
        );
    }

    #[test]
    fn test_vue_layer_carries_recommended_and_house_rules() {
        let catalogue = load().unwrap();
        let rules = catalogue.get("framework/vue").unwrap().fields()["rules"]
            .as_mapping()
            .unwrap();
        assert_eq!(rules["no-debugger"], json!("error"));
        // house style wins over recommended
        assert_eq!(rules["no-dupe-keys"], json!("off"));
        assert_eq!(rules["vue/no-v-html"], json!("warn"));
    }

    #[test]
    fn test_typescript_layer_active_for_vue() {
        let catalogue = load().unwrap();
        let typescript = catalogue.get("language/typescript").unwrap();
        assert!(typescript.activation().includes(ProjectType::Vue));
        assert!(!typescript.activation().includes(ProjectType::Javascript));
    }

    #[test]
    fn test_common_globals_include_extras() {
        let globals: Vec<&str> = common_globals().into_iter().map(|(k, _)| k).collect();
        assert!(globals.contains(&"window"));
        assert!(globals.contains(&"process"));
        assert!(globals.contains(&"Vue"));
    }
}
