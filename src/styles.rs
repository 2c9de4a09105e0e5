use crate::model::{
    AlignmentDescriptor, BorderSideDescriptor, BordersDescriptor, CellStyle, FillDescriptor,
    FontDescriptor, GradientFillDescriptor, GradientStopDescriptor, PatternFillDescriptor,
    ProtectionDescriptor, StyleDescriptor,
};
use once_cell::sync::Lazy;
use regex::Regex;
use umya_spreadsheet::structs::{EnumTrait, HorizontalAlignmentValues, VerticalAlignmentValues};
use umya_spreadsheet::{Alignment, Border, Fill, Font, Protection, Style};

/// Display format applied to columns holding only whole numbers.
pub const INTEGER_FORMAT: &str = "0";

// Quoted literals, escaped characters and bracketed sections ([Red], [$-409])
// never decide whether a format is a date.
static FORMAT_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[^"]*"|\\.|_.|\*.|\[[^\]]*\]"#).expect("static regex"));

/// Splits a umya `Style` into the facets we carry per cell.
pub fn cell_style_from_umya(style: &Style) -> CellStyle {
    CellStyle {
        font: style.get_font().cloned(),
        borders: style.get_borders().map(|borders| {
            let mut carrier = Style::default();
            carrier.set_borders(borders.clone());
            carrier
        }),
        fill: style.get_fill().cloned(),
        number_format: style
            .get_number_format()
            .map(|fmt| fmt.get_format_code().to_string())
            .filter(|code| !is_general_format(code)),
        protection: style.get_protection().cloned(),
        alignment: style.get_alignment().cloned(),
    }
}

/// Builds a fresh umya `Style` from owned copies of each facet.
pub fn umya_style_from_cell_style(style: &CellStyle) -> Style {
    let mut out = Style::default();
    if let Some(font) = &style.font {
        *out.get_font_mut() = font.clone();
    }
    if let Some(borders) = style.borders.as_ref().and_then(Style::get_borders) {
        out.set_borders(borders.clone());
    }
    if let Some(fill) = &style.fill {
        *out.get_fill_mut() = fill.clone();
    }
    if let Some(code) = &style.number_format {
        out.get_number_format_mut().set_format_code(code.as_str());
    }
    if let Some(protection) = &style.protection {
        *out.get_protection_mut() = protection.clone();
    }
    if let Some(alignment) = &style.alignment {
        *out.get_alignment_mut() = alignment.clone();
    }
    out
}

pub fn is_general_format(code: &str) -> bool {
    code.is_empty() || code.eq_ignore_ascii_case("general")
}

/// True when a number format code renders its value as a date or time.
pub fn is_date_format(code: &str) -> bool {
    if is_general_format(code) {
        return false;
    }
    let stripped = FORMAT_NOISE.replace_all(code, "");
    // Elapsed-time codes like [h]:mm are removed above but still mean time.
    let elapsed = code.contains("[h]") || code.contains("[hh]") || code.contains("[mm]");
    elapsed
        || stripped
            .chars()
            .any(|c| matches!(c.to_ascii_lowercase(), 'y' | 'm' | 'd' | 'h' | 's'))
}

pub fn descriptor_from_cell_style(style: &CellStyle) -> StyleDescriptor {
    StyleDescriptor {
        font: style.font.as_ref().and_then(descriptor_from_font),
        fill: style.fill.as_ref().and_then(descriptor_from_fill),
        borders: style.borders.as_ref().and_then(descriptor_from_borders),
        alignment: style.alignment.as_ref().and_then(descriptor_from_alignment),
        protection: style.protection.as_ref().map(descriptor_from_protection),
        number_format: style
            .number_format
            .clone()
            .filter(|code| !is_general_format(code)),
    }
}

pub fn descriptor_from_style(style: &Style) -> StyleDescriptor {
    descriptor_from_cell_style(&cell_style_from_umya(style))
}

fn descriptor_from_font(font: &Font) -> Option<FontDescriptor> {
    let underline = font.get_underline();
    let descriptor = FontDescriptor {
        name: Some(font.get_name().to_string()).filter(|s| !s.is_empty()),
        size: Some(*font.get_size()).filter(|s| *s > 0.0),
        bold: Some(true).filter(|_| *font.get_bold()),
        italic: Some(true).filter(|_| *font.get_italic()),
        underline: if underline.eq_ignore_ascii_case("none") || underline.is_empty() {
            None
        } else {
            Some(underline.to_string())
        },
        strikethrough: Some(true).filter(|_| *font.get_strikethrough()),
        color: Some(font.get_color().get_argb().to_string()).filter(|s| !s.is_empty()),
    };

    if descriptor == FontDescriptor::default() {
        None
    } else {
        Some(descriptor)
    }
}

fn descriptor_from_fill(fill: &Fill) -> Option<FillDescriptor> {
    if let Some(pattern) = fill.get_pattern_fill() {
        let kind = pattern.get_pattern_type().get_value_string();
        let fg = pattern
            .get_foreground_color()
            .map(|c| c.get_argb().to_string())
            .filter(|s| !s.is_empty());
        let bg = pattern
            .get_background_color()
            .map(|c| c.get_argb().to_string())
            .filter(|s| !s.is_empty());

        if kind.eq_ignore_ascii_case("none") && fg.is_none() && bg.is_none() {
            return None;
        }

        return Some(FillDescriptor::Pattern(PatternFillDescriptor {
            pattern_type: Some(kind.to_string()).filter(|k| !k.eq_ignore_ascii_case("none")),
            foreground_color: fg,
            background_color: bg,
        }));
    }

    if let Some(gradient) = fill.get_gradient_fill() {
        let stops: Vec<GradientStopDescriptor> = gradient
            .get_gradient_stop()
            .iter()
            .map(|stop| GradientStopDescriptor {
                position: *stop.get_position(),
                color: stop.get_color().get_argb().to_string(),
            })
            .collect();

        let degree = *gradient.get_degree();
        if stops.is_empty() && degree == 0.0 {
            return None;
        }

        return Some(FillDescriptor::Gradient(GradientFillDescriptor {
            degree: Some(degree).filter(|d| *d != 0.0),
            stops,
        }));
    }

    None
}

fn descriptor_from_borders(carrier: &Style) -> Option<BordersDescriptor> {
    let borders = carrier.get_borders()?;
    let descriptor = BordersDescriptor {
        left: descriptor_from_border_side(borders.get_left_border()),
        right: descriptor_from_border_side(borders.get_right_border()),
        top: descriptor_from_border_side(borders.get_top_border()),
        bottom: descriptor_from_border_side(borders.get_bottom_border()),
        diagonal: descriptor_from_border_side(borders.get_diagonal_border()),
        vertical: descriptor_from_border_side(borders.get_vertical_border()),
        horizontal: descriptor_from_border_side(borders.get_horizontal_border()),
        diagonal_up: Some(true).filter(|_| *borders.get_diagonal_up()),
        diagonal_down: Some(true).filter(|_| *borders.get_diagonal_down()),
    };

    if descriptor == BordersDescriptor::default() {
        None
    } else {
        Some(descriptor)
    }
}

fn descriptor_from_border_side(border: &Border) -> Option<BorderSideDescriptor> {
    let style = border.get_border_style();
    let descriptor = BorderSideDescriptor {
        style: Some(style.to_string()).filter(|s| !s.eq_ignore_ascii_case("none")),
        color: Some(border.get_color().get_argb().to_string()).filter(|s| !s.is_empty()),
    };
    if descriptor == BorderSideDescriptor::default() {
        None
    } else {
        Some(descriptor)
    }
}

fn descriptor_from_alignment(alignment: &Alignment) -> Option<AlignmentDescriptor> {
    let horizontal = alignment.get_horizontal();
    let vertical = alignment.get_vertical();
    let descriptor = AlignmentDescriptor {
        horizontal: (horizontal != &HorizontalAlignmentValues::General)
            .then(|| horizontal.get_value_string().to_string()),
        vertical: (vertical != &VerticalAlignmentValues::Bottom)
            .then(|| vertical.get_value_string().to_string()),
        wrap_text: Some(true).filter(|_| *alignment.get_wrap_text()),
        text_rotation: Some(*alignment.get_text_rotation()).filter(|r| *r != 0),
    };
    if descriptor == AlignmentDescriptor::default() {
        None
    } else {
        Some(descriptor)
    }
}

fn descriptor_from_protection(protection: &Protection) -> ProtectionDescriptor {
    ProtectionDescriptor {
        locked: Some(*protection.get_locked()),
        // umya's hidden getter wants `&mut self`.
        hidden: Some(*protection.clone().get_hidden()),
    }
}
