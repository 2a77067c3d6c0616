//! History command - Show the stored conversation for a problem

use anyhow::Result;

use super::{id, AppContext};
use crate::output::Output;
use crate::views::ConversationView;

pub async fn run(ctx: &AppContext, url: &str) -> Result<()> {
    let problem_id = id::problem_id(url)?.problem_id;
    let history = ctx.client()?.conversation(&problem_id).await?;
    Output::new(ConversationView::new(problem_id, &history), ctx.output).render()
}
