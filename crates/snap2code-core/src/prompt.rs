//! The instruction sent alongside every screenshot.

/// Placeholder replaced by the technology label.
pub const PLACEHOLDER: &str = "{TECH_STACK}";

/// Fixed instruction template. Contains [`PLACEHOLDER`] exactly once.
pub const TEMPLATE: &str = r#"You are an expert front-end engineer and visual layout compiler.

Convert the attached UI image into highly accurate, pixel-perfect code written
with this technology stack and nothing else: {TECH_STACK}

Follow these rules strictly.

1. Visual fidelity
   - Reproduce the image exactly as shown. The image is the source of truth.
   - Match spacing, padding, margins, alignment, border radius, shadows and
     layout proportions as closely as possible.
   - Do not redesign, simplify, improve or creatively adjust anything.

2. Layout and structure
   - Break the interface into logical containers: sections, rows, columns,
     components.
   - Preserve the exact hierarchy and alignment of every element.
   - Use the layout primitives the selected stack provides.

3. Colors and typography
   - Use the closest hex or RGB equivalents of the colors in the image.
   - Match font family, size, weight, line height and letter spacing.
   - When the font cannot be identified, use a neutral system font at the
     same size.

4. Viewport
   - Target a desktop viewport 1440px wide unless told otherwise.
   - Do not add responsive behavior that was not requested.

5. Technology constraints
   - Write code only for the stack named above.
   - Do not mix frameworks, libraries or syntaxes.
   - When several files are required, separate them clearly.

6. Output format
   - Return only code.
   - No explanations, no prose, no markdown.
   - Do not wrap the code in triple backticks.

7. Assets and icons
   - Use placeholders for images that are not provided.
   - Use the closest icon equivalent available in the stack.
   - Do not invent new assets.

You must not add UI elements, change colors or spacing, or restyle the layout.
Compare your result with the image before answering and fix any visual
difference."#;

/// Substitute `technology` into [`TEMPLATE`].
pub fn render(technology: &str) -> String {
    TEMPLATE.replacen(PLACEHOLDER, technology, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_a_single_placeholder() {
        assert_eq!(TEMPLATE.matches(PLACEHOLDER).count(), 1);
    }

    #[test]
    fn render_substitutes_label_once() {
        let prompt = render("Vue");
        assert!(!prompt.contains(PLACEHOLDER));
        assert_eq!(prompt.matches("Vue").count(), 1);

        let prompt = render("React + Tailwind");
        assert_eq!(prompt.matches("React + Tailwind").count(), 1);
    }

    #[test]
    fn renders_differ_only_in_the_label() {
        let (prefix, suffix) = TEMPLATE.split_once(PLACEHOLDER).unwrap();
        for label in ["Vue", "Swift UI"] {
            let prompt = render(label);
            assert!(prompt.starts_with(prefix));
            assert!(prompt.ends_with(suffix));
            assert_eq!(&prompt[prefix.len()..prompt.len() - suffix.len()], label);
        }
    }

    #[test]
    fn template_states_the_fidelity_contract() {
        assert!(TEMPLATE.contains("desktop viewport 1440px wide"));
        assert!(TEMPLATE.contains("Return only code"));
        assert!(TEMPLATE.contains("triple backticks"));
        assert!(TEMPLATE.contains("placeholders for images"));
    }
}
