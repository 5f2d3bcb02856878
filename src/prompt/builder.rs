//! Prompt assembly
//!
//! Builds the generation instruction from the static corpus: a random
//! sample of techniques, the shared requirements, the provider style
//! hint and the caller's category/difficulty/keyword constraints.

use rand::prelude::*;

use crate::models::{GenerationParams, ProviderId};
use crate::prompt::catalog::{
    category_prompt, difficulty_prompt, style_hint, Technique, PROMPT_INTRO, PROMPT_REQUIREMENTS,
    TECHNIQUES,
};

/// How many techniques each prompt samples from the pool
pub const TECHNIQUE_SAMPLE: usize = 4;

/// Build the generation instruction using the default RNG
pub fn build_prompt(provider: ProviderId, params: &GenerationParams) -> String {
    build_prompt_with_rng(provider, params, &mut rand::rng())
}

/// Build the generation instruction with a caller-supplied RNG
///
/// Sampling is without replacement, so the prompt always carries
/// `TECHNIQUE_SAMPLE` distinct techniques. Seeded RNGs make the output
/// reproducible.
pub fn build_prompt_with_rng<R: Rng + ?Sized>(
    provider: ProviderId,
    params: &GenerationParams,
    rng: &mut R,
) -> String {
    let selected: Vec<&Technique> = TECHNIQUES.choose_multiple(rng, TECHNIQUE_SAMPLE).collect();

    let mut prompt = format!(
        "{PROMPT_INTRO}{}{PROMPT_REQUIREMENTS}",
        techniques_section(&selected)
    );

    prompt.push('\n');
    prompt.push_str(style_hint(provider));

    if let Some(category) = params.category {
        prompt.push_str("\n\n【カテゴリ指定】\n");
        prompt.push_str(category_prompt(category));
    }

    if let Some(difficulty) = params.difficulty {
        prompt.push_str("\n\n【難易度設定】\n");
        prompt.push_str(difficulty_prompt(difficulty));
    }

    if let Some(keyword) = &params.keyword {
        prompt.push_str(&format!(
            "\n\n【キーワード指定】\n以下のキーワードやテーマを含めた、またはそれに関連するお題を作成してください：「{keyword}」"
        ));
    }

    prompt.push_str(&format!("\n\n{}個のお題を生成してください。", params.count));

    prompt
}

/// Render the sampled techniques as numbered blocks
fn techniques_section(techniques: &[&Technique]) -> String {
    techniques
        .iter()
        .enumerate()
        .map(|(i, technique)| match technique.example {
            Some(example) => format!(
                "### {}. {}\n{}\n例：{}",
                i + 1,
                technique.name,
                technique.description,
                example
            ),
            None => format!("### {}. {}\n{}", i + 1, technique.name, technique.description),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn params(count: u32) -> GenerationParams {
        GenerationParams {
            category: None,
            difficulty: None,
            count,
            keyword: None,
        }
    }

    #[test]
    fn test_prompt_carries_four_numbered_techniques() {
        let mut rng = StdRng::seed_from_u64(42);
        let prompt = build_prompt_with_rng(ProviderId::OpenAi, &params(5), &mut rng);

        assert_eq!(prompt.matches("### ").count(), TECHNIQUE_SAMPLE);
        for i in 1..=TECHNIQUE_SAMPLE {
            assert!(prompt.contains(&format!("### {i}. ")));
        }
        assert!(prompt.contains("## 要求事項:"));
        assert!(prompt.contains("出力形式:"));
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let a = build_prompt_with_rng(
            ProviderId::Claude,
            &params(5),
            &mut StdRng::seed_from_u64(7),
        );
        let b = build_prompt_with_rng(
            ProviderId::Claude,
            &params(5),
            &mut StdRng::seed_from_u64(7),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_sampling_actually_varies() {
        let prompts: HashSet<String> = (0..20)
            .map(|seed| {
                build_prompt_with_rng(
                    ProviderId::Gemini,
                    &params(5),
                    &mut StdRng::seed_from_u64(seed),
                )
            })
            .collect();
        assert!(prompts.len() > 1);
    }

    #[test]
    fn test_optional_sections_appear_only_when_set() {
        let mut rng = StdRng::seed_from_u64(3);
        let bare = build_prompt_with_rng(ProviderId::OpenAi, &params(5), &mut rng);
        assert!(!bare.contains("【カテゴリ指定】"));
        assert!(!bare.contains("【難易度設定】"));
        assert!(!bare.contains("【キーワード指定】"));

        let full = GenerationParams {
            category: Some(crate::models::Category::Food),
            difficulty: Some(crate::models::Difficulty::Hard),
            count: 5,
            keyword: Some("猫".to_string()),
        };
        let mut rng = StdRng::seed_from_u64(3);
        let prompt = build_prompt_with_rng(ProviderId::OpenAi, &full, &mut rng);
        assert!(prompt.contains("【カテゴリ指定】"));
        assert!(prompt.contains("食べ物や料理"));
        assert!(prompt.contains("【難易度設定】"));
        assert!(prompt.contains("上級者向け"));
        assert!(prompt.contains("「猫」"));
    }

    #[test]
    fn test_prompt_ends_with_count_instruction() {
        let mut rng = StdRng::seed_from_u64(11);
        let prompt = build_prompt_with_rng(ProviderId::Gemini, &params(7), &mut rng);
        assert!(prompt.ends_with("7個のお題を生成してください。"));
    }

    #[test]
    fn test_style_hint_follows_provider() {
        let mut rng = StdRng::seed_from_u64(5);
        let openai = build_prompt_with_rng(ProviderId::OpenAi, &params(5), &mut rng);
        assert!(openai.contains("シュールで不条理"));

        let mut rng = StdRng::seed_from_u64(5);
        let claude = build_prompt_with_rng(ProviderId::Claude, &params(5), &mut rng);
        assert!(claude.contains("言葉の響きや韻"));
    }
}
