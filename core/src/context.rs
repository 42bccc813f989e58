//! Renders retrieved neighbours into the prompt handed to the generator.

use crate::index::Match;
use crate::records::GaitMetrics;

pub const SYSTEM_PROMPT: &str = "You are a helpful biomechanics expert.";

pub fn build_context(matches: &[Match], top_k: usize) -> String {
    let mut out = format!(
        "Here are the top {top_k} most similar running styles based on gait metrics:\n\n"
    );
    for (idx, m) in matches.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} (similarity score: {:.3})\n",
            idx + 1,
            m.id,
            m.score
        ));
    }
    out
}

pub fn build_prompt(query: &GaitMetrics, context: &str) -> String {
    format!(
        "\nYou are a sports biomechanics expert. Based only on the following context,\n\
         explain what kind of runner or animal might have the input gait metrics:\n\
         \n\
         Input gait:\n\
         - Cadence: {:?}\n\
         - Heel strike ratio: {:?}\n\
         - Vertical oscillation: {:?} cm\n\
         \n\
         Context:\n\
         {}\n\
         \n\
         Answer:\n",
        query.cadence, query.heel_strike, query.vertical_oscillation, context
    )
}
