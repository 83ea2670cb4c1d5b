use async_trait::async_trait;

use crate::models::Result;

/// Destination for rendered leaderboard text and the short in-game popup.
/// Implementations may be rate-limited; the service paces multi-table runs
/// for them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliverySink: Send + Sync {
    async fn send_lines(&self, lines: &[String]) -> Result<()>;
    async fn popup(&self, text: &str) -> Result<()>;
}

/// Prints straight to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink;

#[async_trait]
impl DeliverySink for ConsoleSink {
    async fn send_lines(&self, lines: &[String]) -> Result<()> {
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }

    async fn popup(&self, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }
}
