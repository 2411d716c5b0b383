// src/ai/mod.rs

use crate::extractors::normalize::NormalizedTable;
use crate::utils::error::AiError;

// Chat-completion endpoint configuration. The credential comes from the
// environment; no key means the Q&A feature runs in offline mode.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const COMPLETION_MODEL: &str = "gpt-4.1-mini";

/// Canned answer returned when no API credential is configured.
pub const OFFLINE_ANSWER: &str =
    "Offline mode (no API key)\nCompany appears financially stable and profitable.";

/// Maximum number of records summarized per table.
const SUMMARY_RECORD_CAP: usize = 50;

/// Condenses a normalized table into plain text for the Q&A prompt.
///
/// Takes up to the first 50 records, joins each record's non-blank cells
/// with ", ", keeps only lines that contain at least one digit (the ones
/// carrying figures), and joins the survivors with newlines.
pub fn table_to_text(table: &NormalizedTable) -> String {
    let lines: Vec<String> = table
        .records
        .iter()
        .take(SUMMARY_RECORD_CAP)
        .filter_map(|record| {
            let joined = record
                .iter()
                .filter(|cell| !cell.is_blank())
                .map(|cell| cell.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            if joined.chars().any(|ch| ch.is_ascii_digit()) {
                Some(joined)
            } else {
                None
            }
        })
        .collect();

    lines.join("\n")
}

/// Assembles the Q&A context from both statement extracts.
pub fn build_context(balance_sheet: &NormalizedTable, profit_loss: &NormalizedTable) -> String {
    format!("{}\n{}", table_to_text(balance_sheet), table_to_text(profit_loss))
}

/// Answers one question over the extracted figures.
///
/// Without a configured credential this short-circuits to the offline
/// placeholder. Otherwise it makes a single chat-completion request with
/// one user message embedding the context and the question, and returns the
/// trimmed response text. No retry, no streaming, no conversation history.
pub async fn answer_question(question: &str, context: &str) -> Result<String, AiError> {
    let key = match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => key,
        _ => {
            tracing::warn!("{} not set, answering in offline mode", API_KEY_ENV);
            return Ok(OFFLINE_ANSWER.to_string());
        }
    };

    let prompt = build_prompt(question, context);
    tracing::debug!("Sending completion request ({} byte prompt)", prompt.len());

    let client = reqwest::Client::new();
    let response = client
        .post(COMPLETIONS_URL)
        .bearer_auth(key)
        .json(&serde_json::json!({
            "model": COMPLETION_MODEL,
            "messages": [{ "role": "user", "content": prompt }],
        }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("Completion API returned HTTP {}", status);
        return Err(AiError::Http(status));
    }

    let body: serde_json::Value = response.json().await?;
    let answer = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| AiError::Parse("response missing choices[0].message.content".to_string()))?;

    Ok(answer.trim().to_string())
}

fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "Use only the financial data below to answer:\n\n{}\n\nQuestion: {}\nBe concise and analytical.",
        context, question
    )
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::normalize::normalize;

    fn table(raw: &[&[&str]]) -> NormalizedTable {
        normalize(
            raw.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_summary_keeps_only_lines_with_digits() {
        let t = table(&[
            &["Particulars", "2024"],
            &["Revenue", "9,500"],
            &["Notes follow overleaf", "see annexure"],
        ]);
        assert_eq!(table_to_text(&t), "Revenue, 9500");
    }

    #[test]
    fn test_summary_skips_blank_cells() {
        let t = table(&[
            &["Particulars", "Note", "2024"],
            &["Revenue", "", "9,500"],
        ]);
        // Blank "Note" column: dropped column-wise upstream, but a blank cell
        // inside a kept column must also be skipped when joining.
        let t2 = table(&[
            &["Particulars", "Note", "2024"],
            &["Revenue", "", "9,500"],
            &["Net Profit", "21", "1,200"],
        ]);
        assert_eq!(table_to_text(&t), "Revenue, 9500");
        assert_eq!(table_to_text(&t2), "Revenue, 9500\nNet Profit, 21, 1200");
    }

    #[test]
    fn test_summary_caps_at_fifty_records() {
        let mut rows: Vec<Vec<String>> = vec![vec!["Particulars".into(), "Value".into()]];
        for i in 0..80 {
            rows.push(vec![format!("Line {}", i), format!("{}", i * 10)]);
        }
        let t = normalize(rows);
        assert_eq!(t.record_count(), 80);
        assert_eq!(table_to_text(&t).lines().count(), 50);
    }

    #[test]
    fn test_empty_table_summarizes_to_empty_string() {
        assert_eq!(table_to_text(&NormalizedTable::default()), "");
    }

    #[test]
    fn test_build_context_joins_both_tables() {
        let bs = table(&[&["P", "V"], &["Total Assets", "100"]]);
        let pl = table(&[&["P", "V"], &["Revenue", "200"]]);
        assert_eq!(
            build_context(&bs, &pl),
            "Total Assets, 100\nRevenue, 200"
        );
    }

    #[test]
    fn test_prompt_embeds_context_and_question() {
        let prompt = build_prompt("How profitable?", "Revenue, 9500");
        assert!(prompt.contains("Revenue, 9500"));
        assert!(prompt.contains("Question: How profitable?"));
    }

    #[test]
    fn test_offline_answer_without_credential() {
        // No other test in this crate sets the key, so removing it here is
        // race-free.
        std::env::remove_var(API_KEY_ENV);
        let answer = tokio_test::block_on(answer_question("Is it stable?", "Revenue, 9500"))
            .unwrap();
        assert_eq!(answer, OFFLINE_ANSWER);
    }
}
