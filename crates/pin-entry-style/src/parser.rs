//! Style sheet parser using the `cssparser` crate.
//!
//! A PIN style sheet is a list of rules in CSS syntax:
//!
//! ```css
//! PinEntry {
//!     slot-count: 6;
//!     mask-glyph: "*";
//!     border-color: #333333;
//! }
//!
//! PinEntry#otp {
//!     slot-count: 4;
//!     mask-enabled: false;
//! }
//! ```
//!
//! Parsing never aborts. A rule with a bad selector is skipped whole; a bad
//! declaration is skipped on its own. Each skipped item is logged and kept
//! as a diagnostic on the resulting [`StyleSheet`].

use cssparser::{
    BasicParseErrorKind, Delimiter, ParseError as CssParseError, ParseErrorKind, Parser,
    ParserInput, Token,
};
use pin_entry_core::logging::targets;
use pin_entry_render::Color;

use crate::Error;
use crate::rules::{PinStyleOverrides, Selector, StyleRule, StyleSheet};
use crate::value::LengthValue;

#[derive(Debug, Clone, PartialEq)]
enum SyntaxError {
    UnknownProperty(String),
    InvalidValue(&'static str),
    InvalidSelector(&'static str),
}

type CssResult<'i, T> = std::result::Result<T, CssParseError<'i, SyntaxError>>;

/// A single parsed declaration.
#[derive(Debug, Clone, PartialEq)]
enum Declaration {
    SlotCount(i32),
    MaskEnabled(bool),
    MaskGlyph(String),
    BorderColor(Color),
    TextColor(Color),
    SlotWidth(LengthValue),
    SlotSpacing(LengthValue),
    TextSize(LengthValue),
}

impl Declaration {
    fn apply(self, overrides: &mut PinStyleOverrides) {
        match self {
            Self::SlotCount(v) => overrides.slot_count = Some(v),
            Self::MaskEnabled(v) => overrides.mask_enabled = Some(v),
            Self::MaskGlyph(v) => overrides.mask_glyph = Some(v),
            Self::BorderColor(v) => overrides.border_color = Some(v),
            Self::TextColor(v) => overrides.text_color = Some(v),
            Self::SlotWidth(v) => overrides.slot_width = Some(v),
            Self::SlotSpacing(v) => overrides.slot_spacing = Some(v),
            Self::TextSize(v) => overrides.text_size = Some(v),
        }
    }
}

/// Parse a style sheet string.
pub(crate) fn parse_stylesheet(css: &str) -> StyleSheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut sheet = StyleSheet::default();
    let mut order = 0u32;

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        match parse_rule(&mut parser, order, &mut sheet.diagnostics) {
            Ok(rule) => {
                sheet.rules.push(rule);
                order += 1;
            }
            Err(e) => {
                tracing::warn!(target: targets::STYLE, "skipping style rule: {}", e);
                sheet.diagnostics.push(e);
            }
        }
    }

    tracing::debug!(
        target: targets::STYLE,
        rules = sheet.rules.len(),
        diagnostics = sheet.diagnostics.len(),
        "parsed style sheet"
    );
    sheet
}

/// Parse a single rule: selector { declarations }
fn parse_rule<'i>(
    parser: &mut Parser<'i, '_>,
    order: u32,
    diagnostics: &mut Vec<Error>,
) -> crate::Result<StyleRule> {
    let start = parser.position();
    let location = parser.current_source_location();

    let selector = parser.parse_until_before(Delimiter::CurlyBracketBlock, |p| parse_selector(p));
    let selector_text = parser.slice_from(start).trim().to_owned();

    // An unconsumed block is skipped by the next call to `next()`, which is
    // how a rule with a bad selector is dropped.
    match parser.next() {
        Ok(Token::CurlyBracketBlock) => {}
        _ => {
            return Err(Error::parse(
                format!("expected '{{' after selector '{selector_text}'"),
                location.line + 1,
                location.column,
            ));
        }
    }

    let selector = selector.map_err(|e| selector_error(&selector_text, e))?;

    let overrides = parser
        .parse_nested_block(|block| {
            Ok::<_, CssParseError<'i, SyntaxError>>(parse_declarations(block, diagnostics))
        })
        .unwrap_or_default();

    Ok(StyleRule::new(selector, overrides, order))
}

/// Parse `*`, `PinEntry`, `#name` or `PinEntry#name`.
///
/// Whitespace is significant: `PinEntry #name` is a descendant selector,
/// which is not supported, and is rejected rather than read as a compound.
fn parse_selector<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, Selector> {
    let mut selector = Selector::default();
    let mut seen_any = false;
    let mut after_whitespace = false;

    while let Ok(token) = parser.next_including_whitespace() {
        match token.clone() {
            Token::WhiteSpace(_) => {
                after_whitespace = seen_any;
                continue;
            }
            _ if after_whitespace => {
                return Err(parser.new_custom_error(SyntaxError::InvalidSelector(
                    "combinators are not supported",
                )));
            }
            Token::Ident(name) if !seen_any => {
                selector.type_name = Some(name.to_string());
            }
            Token::Delim('*') if !seen_any => {}
            Token::IDHash(id) if selector.id.is_none() => {
                selector.id = Some(id.to_string());
            }
            _ => {
                return Err(parser.new_custom_error(SyntaxError::InvalidSelector(
                    "only type and id selectors are supported",
                )));
            }
        }
        seen_any = true;
    }

    if !seen_any {
        return Err(parser.new_custom_error(SyntaxError::InvalidSelector("empty selector")));
    }

    Ok(selector)
}

/// Parse the declarations of one rule block.
fn parse_declarations(parser: &mut Parser<'_, '_>, diagnostics: &mut Vec<Error>) -> PinStyleOverrides {
    let mut overrides = PinStyleOverrides::new();

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        // Stray semicolons are empty declarations.
        if parser.try_parse(|p| p.expect_semicolon()).is_ok() {
            continue;
        }

        let location = parser.current_source_location();
        let mut property = None;
        let result =
            parser.parse_until_after(Delimiter::Semicolon, |p| parse_declaration(p, &mut property));

        match result {
            Ok(declaration) => declaration.apply(&mut overrides),
            Err(e) => {
                let error = declaration_error(property.as_deref(), e, location.line + 1, location.column);
                let property = error.property().unwrap_or_default();
                if matches!(error, Error::UnknownProperty { .. }) {
                    tracing::debug!(target: targets::STYLE, property, "{}", error);
                } else {
                    tracing::warn!(target: targets::STYLE, property, "{}", error);
                }
                diagnostics.push(error);
            }
        }
    }

    overrides
}

/// Parse `name: value`. The delimited parser ends at the semicolon.
fn parse_declaration<'i>(
    parser: &mut Parser<'i, '_>,
    property: &mut Option<String>,
) -> CssResult<'i, Declaration> {
    let name = parser.expect_ident()?.to_ascii_lowercase();
    *property = Some(name.clone());
    parser.expect_colon()?;

    let declaration = match name.as_str() {
        "slot-count" => Declaration::SlotCount(parse_integer(parser)?),
        "mask-enabled" => Declaration::MaskEnabled(parse_bool(parser)?),
        "mask-glyph" => Declaration::MaskGlyph(parse_glyph(parser)?),
        "border-color" => Declaration::BorderColor(parse_color(parser)?),
        "text-color" => Declaration::TextColor(parse_color(parser)?),
        "slot-width" => Declaration::SlotWidth(parse_length(parser)?),
        "slot-spacing" => Declaration::SlotSpacing(parse_length(parser)?),
        "text-size" => Declaration::TextSize(parse_length(parser)?),
        _ => return Err(parser.new_custom_error(SyntaxError::UnknownProperty(name))),
    };

    parser.expect_exhausted()?;
    Ok(declaration)
}

fn parse_integer<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, i32> {
    let token = parser.next()?;

    match token.clone() {
        Token::Number {
            int_value: Some(n), ..
        } => Ok(n),
        _ => Err(parser.new_custom_error(SyntaxError::InvalidValue("expected an integer"))),
    }
}

fn parse_bool<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, bool> {
    let token = parser.next()?;

    match token.clone() {
        Token::Ident(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Token::Ident(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(parser.new_custom_error(SyntaxError::InvalidValue("expected 'true' or 'false'"))),
    }
}

/// A glyph may be quoted (`"*"`), a bare identifier (`•`) or a single delimiter (`*`).
fn parse_glyph<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, String> {
    let token = parser.next()?;

    match token.clone() {
        Token::QuotedString(s) | Token::Ident(s) => Ok(s.to_string()),
        Token::Delim(c) => Ok(c.to_string()),
        _ => Err(parser.new_custom_error(SyntaxError::InvalidValue("expected a glyph"))),
    }
}

fn parse_length<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, LengthValue> {
    let token = parser.next()?;

    match token.clone() {
        // CSS `0` is a valid length without a unit.
        Token::Number { value, .. } if value == 0.0 => Ok(LengthValue::Dp(0.0)),
        Token::Dimension { value, unit, .. } => {
            if unit.eq_ignore_ascii_case("dp") || unit.eq_ignore_ascii_case("dip") {
                Ok(LengthValue::Dp(value))
            } else if unit.eq_ignore_ascii_case("px") {
                Ok(LengthValue::Px(value))
            } else {
                Err(parser.new_custom_error(SyntaxError::InvalidValue("unsupported length unit")))
            }
        }
        _ => Err(parser.new_custom_error(SyntaxError::InvalidValue("expected a length"))),
    }
}

/// Parse a color value.
fn parse_color<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, Color> {
    let token = parser.next()?;

    match token.clone() {
        Token::Hash(hash) | Token::IDHash(hash) => Color::from_hex(&hash)
            .ok_or_else(|| parser.new_custom_error(SyntaxError::InvalidValue("invalid hex color"))),
        Token::Ident(name) => match name.to_ascii_lowercase().as_str() {
            "transparent" => Ok(Color::TRANSPARENT),
            "black" => Ok(Color::BLACK),
            "white" => Ok(Color::WHITE),
            "red" => Ok(Color::RED),
            "green" => Ok(Color::GREEN),
            "blue" => Ok(Color::BLUE),
            "yellow" => Ok(Color::YELLOW),
            "cyan" => Ok(Color::CYAN),
            "magenta" => Ok(Color::MAGENTA),
            "gray" | "grey" => Ok(Color::GRAY),
            _ => Err(parser.new_custom_error(SyntaxError::InvalidValue("unknown color name"))),
        },
        Token::Function(name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            let (r, g, b, a) = parser.parse_nested_block(|p| {
                let r = parse_color_component(p)?;
                p.expect_comma()?;
                let g = parse_color_component(p)?;
                p.expect_comma()?;
                let b = parse_color_component(p)?;
                let a = if p.try_parse(|p| p.expect_comma()).is_ok() {
                    parse_alpha_component(p)?
                } else {
                    1.0
                };
                Ok::<_, CssParseError<'i, SyntaxError>>((r, g, b, a))
            })?;
            Ok(Color::from_rgba(r, g, b, a))
        }
        _ => Err(parser.new_custom_error(SyntaxError::InvalidValue("expected a color"))),
    }
}

fn parse_color_component<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, f32> {
    let token = parser.next()?;

    match token.clone() {
        Token::Number { value, .. } => Ok((value / 255.0).clamp(0.0, 1.0)),
        Token::Percentage { unit_value, .. } => Ok(unit_value.clamp(0.0, 1.0)),
        _ => Err(parser.new_custom_error(SyntaxError::InvalidValue("expected a color component"))),
    }
}

fn parse_alpha_component<'i>(parser: &mut Parser<'i, '_>) -> CssResult<'i, f32> {
    let token = parser.next()?;

    match token.clone() {
        Token::Number { value, .. } => Ok(value.clamp(0.0, 1.0)),
        Token::Percentage { unit_value, .. } => Ok(unit_value.clamp(0.0, 1.0)),
        _ => Err(parser.new_custom_error(SyntaxError::InvalidValue("expected an alpha value"))),
    }
}

fn describe(kind: &BasicParseErrorKind<'_>) -> String {
    match kind {
        BasicParseErrorKind::UnexpectedToken(token) => format!("unexpected token {token:?}"),
        BasicParseErrorKind::EndOfInput => "unexpected end of input".to_string(),
        other => format!("{other:?}"),
    }
}

fn selector_error(selector: &str, error: CssParseError<'_, SyntaxError>) -> Error {
    let message = match &error.kind {
        ParseErrorKind::Custom(SyntaxError::InvalidSelector(msg)) => (*msg).to_string(),
        ParseErrorKind::Custom(other) => format!("{other:?}"),
        ParseErrorKind::Basic(kind) => describe(kind),
    };
    Error::invalid_selector(selector, message)
}

fn declaration_error(
    property: Option<&str>,
    error: CssParseError<'_, SyntaxError>,
    line: u32,
    column: u32,
) -> Error {
    match (error.kind, property) {
        (ParseErrorKind::Custom(SyntaxError::UnknownProperty(name)), _) => {
            Error::unknown_property(name)
        }
        (ParseErrorKind::Custom(SyntaxError::InvalidValue(msg)), Some(property)) => {
            Error::invalid_value(property, msg)
        }
        (ParseErrorKind::Basic(kind), Some(property)) => {
            Error::invalid_value(property, describe(&kind))
        }
        (ParseErrorKind::Basic(kind), None) => Error::parse(describe(&kind), line, column),
        (ParseErrorKind::Custom(other), _) => Error::parse(format!("{other:?}"), line, column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rule() {
        let sheet = parse_stylesheet("PinEntry { slot-count: 4; }");

        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selector.to_string(), "PinEntry");
        assert_eq!(sheet.rules[0].overrides.slot_count, Some(4));
        assert!(sheet.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_every_property() {
        let css = r#"
            PinEntry {
                slot-count: 8;
                mask-enabled: false;
                mask-glyph: "•";
                border-color: #336699;
                text-color: rgb(255, 0, 0);
                slot-width: 48dp;
                slot-spacing: 12px;
                text-size: 20dp;
            }
        "#;
        let sheet = parse_stylesheet(css);
        let o = &sheet.rules[0].overrides;

        assert_eq!(o.slot_count, Some(8));
        assert_eq!(o.mask_enabled, Some(false));
        assert_eq!(o.mask_glyph.as_deref(), Some("•"));
        assert_eq!(o.border_color, Color::from_hex("#336699"));
        assert_eq!(o.text_color, Some(Color::RED));
        assert_eq!(o.slot_width, Some(LengthValue::Dp(48.0)));
        assert_eq!(o.slot_spacing, Some(LengthValue::Px(12.0)));
        assert_eq!(o.text_size, Some(LengthValue::Dp(20.0)));
        assert!(sheet.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_id_selectors() {
        let css = "#otp { slot-count: 4; } PinEntry#login { slot-count: 6; }";
        let sheet = parse_stylesheet(css);

        assert_eq!(sheet.rules.len(), 2);
        assert_eq!(sheet.rules[0].selector.id.as_deref(), Some("otp"));
        assert!(sheet.rules[0].selector.type_name.is_none());
        assert_eq!(sheet.rules[1].selector.to_string(), "PinEntry#login");
        assert_eq!(sheet.rules[1].order, 1);
    }

    #[test]
    fn test_parse_unquoted_glyphs() {
        let sheet = parse_stylesheet("PinEntry { mask-glyph: *; } #a { mask-glyph: x; }");

        assert_eq!(sheet.rules[0].overrides.mask_glyph.as_deref(), Some("*"));
        assert_eq!(sheet.rules[1].overrides.mask_glyph.as_deref(), Some("x"));
    }

    #[test]
    fn test_bad_declaration_keeps_the_rest() {
        let css = "PinEntry { slot-count: six; mask-glyph: \"#\"; text-color: blurple; }";
        let sheet = parse_stylesheet(css);

        assert_eq!(sheet.rules.len(), 1);
        let o = &sheet.rules[0].overrides;
        assert_eq!(o.slot_count, None);
        assert_eq!(o.mask_glyph.as_deref(), Some("#"));
        assert_eq!(o.text_color, None);
        assert_eq!(sheet.diagnostics.len(), 2);
        assert!(matches!(
            &sheet.diagnostics[0],
            Error::InvalidValue { property, .. } if property == "slot-count"
        ));
    }

    #[test]
    fn test_missing_value_does_not_swallow_next_declaration() {
        let sheet = parse_stylesheet("PinEntry { slot-count: ; mask-enabled: false }");

        assert_eq!(sheet.rules[0].overrides.slot_count, None);
        assert_eq!(sheet.rules[0].overrides.mask_enabled, Some(false));
        assert_eq!(sheet.diagnostics.len(), 1);
    }

    #[test]
    fn test_trailing_tokens_reject_declaration() {
        let sheet = parse_stylesheet("PinEntry { slot-count: 4 5; }");

        assert_eq!(sheet.rules[0].overrides.slot_count, None);
        assert_eq!(sheet.diagnostics.len(), 1);
    }

    #[test]
    fn test_unknown_property_is_reported() {
        let sheet = parse_stylesheet("PinEntry { corner-radius: 4dp; slot-count: 5; }");

        assert_eq!(sheet.rules[0].overrides.slot_count, Some(5));
        assert!(matches!(
            &sheet.diagnostics[0],
            Error::UnknownProperty { property } if property == "corner-radius"
        ));
    }

    #[test]
    fn test_bad_selector_skips_only_that_rule() {
        let css = "PinEntry > Label { slot-count: 2; } PinEntry { slot-count: 3; }";
        let sheet = parse_stylesheet(css);

        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].overrides.slot_count, Some(3));
        assert!(matches!(&sheet.diagnostics[0], Error::InvalidSelector { .. }));
    }

    #[test]
    fn test_descendant_selector_rejected() {
        let css = "PinEntry #otp { slot-count: 4; } PinEntry#pin  { slot-count: 5; }";
        let sheet = parse_stylesheet(css);

        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selector.to_string(), "PinEntry#pin");
        assert!(matches!(
            &sheet.diagnostics[0],
            Error::InvalidSelector { selector, .. } if selector == "PinEntry #otp"
        ));
    }

    #[test]
    fn test_stray_semicolons_and_comments_are_ignored() {
        let css = "/* pin */ PinEntry { ; slot-count: 4;; /* note */ }";
        let sheet = parse_stylesheet(css);

        assert_eq!(sheet.rules[0].overrides.slot_count, Some(4));
        assert!(sheet.diagnostics.is_empty());
    }

    #[test]
    fn test_unsupported_length_unit() {
        let sheet = parse_stylesheet("PinEntry { slot-width: 3em; slot-spacing: 0; }");

        assert_eq!(sheet.rules[0].overrides.slot_width, None);
        assert_eq!(sheet.rules[0].overrides.slot_spacing, Some(LengthValue::Dp(0.0)));
        assert_eq!(sheet.diagnostics.len(), 1);
    }

    #[test]
    fn test_parse_color_formats() {
        let sheet = parse_stylesheet(
            "PinEntry { border-color: #f00; text-color: rgba(0, 0, 255, 0.5); }",
        );
        let o = &sheet.rules[0].overrides;

        assert_eq!(o.border_color, Some(Color::RED));
        assert_eq!(o.text_color, Some(Color::from_rgba(0.0, 0.0, 1.0, 0.5)));
    }

    #[test]
    fn test_empty_input() {
        let sheet = parse_stylesheet("   ");
        assert!(sheet.rules.is_empty());
        assert!(sheet.diagnostics.is_empty());
    }
}
