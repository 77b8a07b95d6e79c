use crate::llm::ChatMessage;

use super::types::TranslationRequest;

/// System turn followed by the text to translate. Expects trimmed fields.
pub fn build_prompt(request: &TranslationRequest) -> Vec<ChatMessage> {
    let system = format!(
        "You are an assistant that translates text from {} to {}. Provide only the translated text without any additional explanations, comments, or context.",
        request.input_language, request.output_language
    );

    vec![ChatMessage::system(system), ChatMessage::user(request.input.clone())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn two_turns_with_languages_substituted() {
        let request = TranslationRequest {
            input_language: "en".into(),
            output_language: "ur".into(),
            input: "Hello".into(),
        };
        let prompt = build_prompt(&request);

        assert_eq!(prompt.len(), 2);
        assert_eq!(prompt[0].role, Role::System);
        assert_eq!(
            prompt[0].content,
            "You are an assistant that translates text from en to ur. Provide only the translated text without any additional explanations, comments, or context."
        );
        assert_eq!(prompt[1].role, Role::User);
        assert_eq!(prompt[1].content, "Hello");
    }

    #[test]
    fn placeholders_in_values_are_not_expanded() {
        let request = TranslationRequest {
            input_language: "{output_language}".into(),
            output_language: "fr".into(),
            input: "{input}".into(),
        };
        let prompt = build_prompt(&request);

        assert!(prompt[0].content.contains("from {output_language} to fr."));
        assert_eq!(prompt[1].content, "{input}");
    }
}
