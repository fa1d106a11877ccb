//! Lint rule sets passed to the lint base middlewares.

use serde_json::{json, Value};

use crate::core::environment::{Environment, Mode};

/// Flavour of the shared lint rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintFlavor {
    /// Plain JavaScript projects (80 column lines).
    Base,
    /// React applications (120 column lines, JSX rules).
    React,
    /// React libraries and component kits.
    Library,
}

impl LintFlavor {
    /// The lint base middleware this flavour extends by default.
    pub fn default_base(&self) -> &'static str {
        match self {
            LintFlavor::Base | LintFlavor::Library => "airbnb-base",
            LintFlavor::React => "airbnb",
        }
    }
}

fn console_rule(env: &Environment) -> &'static str {
    // Console output is fine while developing, an error anywhere else.
    if env.mode() == Mode::Development {
        "off"
    } else {
        "error"
    }
}

fn padding_rule() -> Value {
    json!([
        "error",
        { "blankLine": "always", "prev": ["const", "let", "var"], "next": "*" },
        { "blankLine": "never", "prev": ["const", "let", "var"], "next": ["const", "let", "var"] },
        { "blankLine": "always", "prev": "multiline-block-like", "next": "*" },
        { "blankLine": "always", "prev": "*", "next": ["if", "do", "for", "switch", "try", "while"] },
        { "blankLine": "always", "prev": "*", "next": "return" }
    ])
}

fn max_len(columns: u32) -> Value {
    json!([
        "error",
        columns,
        2,
        {
            "ignoreUrls": true,
            "ignoreComments": false,
            "ignoreStrings": true,
            "ignoreTemplateLiterals": true
        }
    ])
}

fn prettier(trailing_comma: &str) -> Value {
    json!([
        "error",
        {
            "singleQuote": true,
            "trailingComma": trailing_comma,
            "bracketSpacing": true,
            "jsxBracketSameLine": true
        }
    ])
}

/// ESLint option bag for the given flavour.
pub fn eslint_options(flavor: LintFlavor, env: &Environment) -> Value {
    match flavor {
        LintFlavor::Base => base_options(env),
        LintFlavor::React => react_options(env),
        LintFlavor::Library => library_options(env),
    }
}

fn base_options(env: &Environment) -> Value {
    json!({
        "emitWarning": env.mode() == Mode::Development,
        "baseConfig": {
            "extends": ["plugin:react/recommended", "eslint-config-prettier"]
        },
        "plugins": ["eslint-plugin-prettier"],
        "rules": {
            "max-len": max_len(80),
            "class-methods-use-this": "off",
            "no-console": console_rule(env),
            "no-extra-parens": "off",
            "prefer-const": "error",
            "prettier/prettier": prettier("es5"),
            "padding-line-between-statements": padding_rule(),
            "consistent-return": "off",
            "no-unused-expressions": "off",
            "no-shadow": "off",
            "no-return-assign": "off",
            "babel/new-cap": "off",
            "no-mixed-operators": "off"
        }
    })
}

fn react_options(env: &Environment) -> Value {
    let mut options = base_options(env);
    let rules = json!({
        "max-len": max_len(120),
        "comma-dangle": ["error", "never"],
        "jsx-quotes": ["error", "prefer-double"],
        "prettier/prettier": prettier("none"),
        "jsx-a11y/anchor-is-valid": ["error", { "components": ["Link"], "specialLink": ["to"] }],
        "jsx-a11y/click-events-have-key-events": "off",
        "jsx-a11y/no-static-element-interactions": "off",
        "react/jsx-curly-spacing": ["error", "never"],
        "react/jsx-equals-spacing": ["error", "never"],
        "react/jsx-first-prop-new-line": ["error", "multiline"],
        "react/jsx-indent-props": ["error", 2],
        "react/jsx-key": "error",
        "react/jsx-no-comment-textnodes": "error",
        "react/jsx-no-target-blank": "error",
        "react/jsx-pascal-case": "error",
        "react/jsx-tag-spacing": ["error", { "beforeSelfClosing": "always" }],
        // Must be paired with no-extra-parens: off
        "react/jsx-wrap-multilines": "error",
        "react/default-props-match-prop-types": "off",
        "react/jsx-closing-bracket-location": "off",
        "react/jsx-handler-names": ["error", {
            "eventHandlerPrefix": "handle",
            "eventHandlerPropPrefix": "on"
        }],
        "react/jsx-indent": "off",
        "react/prefer-stateless-function": "off",
        "react/prop-types": "off",
        "react/sort-comp": "off",
        "react/forbid-prop-types": "off",
        "react/no-unused-prop-types": "off",
        "react/require-default-props": "off"
    });

    if let (Some(target), Some(extra)) = (
        options["rules"].as_object_mut(),
        rules.as_object(),
    ) {
        for (name, rule) in extra {
            target.insert(name.clone(), rule.clone());
        }
    }
    options
}

fn library_options(env: &Environment) -> Value {
    json!({
        "plugins": ["eslint-plugin-react", "eslint-plugin-prettier"],
        "baseConfig": {
            "extends": [
                "plugin:react/recommended",
                "eslint-config-prettier",
                "eslint-config-prettier/react"
            ]
        },
        "rules": {
            "babel/new-cap": "off",
            "class-methods-use-this": "off",
            "consistent-return": "off",
            "no-console": console_rule(env),
            "no-shadow": "off",
            "padding-line-between-statements": padding_rule(),
            "prefer-const": "error",
            "prettier/prettier": prettier("none"),
            "react/jsx-key": "error",
            "react/jsx-no-comment-textnodes": "error",
            "react/jsx-no-target-blank": "error",
            "react/jsx-pascal-case": "error",
            "react/prop-types": "off"
        }
    })
}
