//! Fixed instructions for the two generation stages.
//!
//! Both stages share model and sampling options; only the system instruction and the
//! prompt body differ.

/// LinkedIn's limit on connection notes. Stated to the model, not enforced on its output.
pub const MESSAGE_CHAR_LIMIT: usize = 200;

const EXTRACTION_SYSTEM: &str = "\
You are an AI assistant that extracts key professional information from raw HTML content of a LinkedIn profile.
Focus on extracting:
- User's Name
- Current Job Title and Company
- Previous Job Titles and Companies
- Education (Degrees, Universities)
- Key Skills/Expertise
- Any notable achievements or projects (briefly)
- Industries they have worked in
- Location

Format the output as a concise, readable summary, using bullet points for lists.
Do NOT include any personal opinions, greetings, or conversational filler.
If information is not present, omit that section.";

pub fn extraction_system() -> &'static str {
    EXTRACTION_SYSTEM
}

pub fn extraction_prompt(html: &str) -> String {
    format!("Extract professional information from the following LinkedIn profile HTML:\n\n{html}")
}

pub fn composition_system(person_name: &str) -> String {
    format!(
        "You are an AI assistant that generates a polite and concise LinkedIn connection request message based on extracted professional information.
The message should be:
- Personalized using the person's name ({person_name}).
- Professional and to the point (max 2-3 sentences).
- Briefly mention a commonality or reason for connecting based on the extracted info (e.g., shared industry, interesting role, common skill).
- End with a polite closing.
- Do NOT include any greetings like \"Hello\" or \"Hi [Name]\", just start with the message content directly.
- Do NOT include your own name or signature.
- Ensure the message is under {MESSAGE_CHAR_LIMIT} characters, as LinkedIn connection notes have a character limit."
    )
}

pub fn composition_prompt(person_name: &str, summary: &str) -> String {
    format!(
        "Generate a LinkedIn connection message for {person_name} based on their profile summary:\n\n{summary}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_system_lists_every_field() {
        let system = extraction_system();
        for field in [
            "Name",
            "Current Job Title",
            "Previous Job Titles",
            "Education",
            "Skills",
            "achievements",
            "Industries",
            "Location",
        ] {
            assert!(system.contains(field), "missing {field}");
        }
        assert!(system.contains("omit that section"));
    }

    #[test]
    fn test_extraction_prompt_embeds_document() {
        let prompt = extraction_prompt("<html><h1>Jane</h1></html>");
        assert!(prompt.starts_with("Extract professional information"));
        assert!(prompt.ends_with("\n\n<html><h1>Jane</h1></html>"));
    }

    #[test]
    fn test_composition_system_is_parameterised_on_name() {
        let system = composition_system("Jane Doe");
        assert!(system.contains("(Jane Doe)"));
        assert!(system.contains("under 200 characters"));
        assert!(system.contains("2-3 sentences"));
        assert!(system.contains("signature"));
    }

    #[test]
    fn test_composition_prompt_carries_summary() {
        let prompt = composition_prompt("Jane Doe", "Skills: Rust");
        assert!(prompt.contains("for Jane Doe"));
        assert!(prompt.ends_with("\n\nSkills: Rust"));
    }
}
