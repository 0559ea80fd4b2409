//! Runs the minimax search off the UI task.

use noughts_core::{AI_PLAYER, Board, HUMAN_PLAYER, Position, find_best_move};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};

/// Request for the AI move on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiRequest {
    /// Board generation the request belongs to.
    pub generation: u64,
    /// Board to search.
    pub board: Board,
}

/// Search result for an [`AiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiReply {
    /// Generation copied from the request.
    pub generation: u64,
    /// Chosen square, `None` if the board had no move.
    pub position: Option<Position>,
}

/// Spawns searches and reports results on a channel.
#[derive(Debug, Clone)]
pub struct AiWorker {
    delay: Duration,
    reply_tx: mpsc::UnboundedSender<AiReply>,
}

impl AiWorker {
    /// Creates a worker that waits `delay` before each search.
    pub fn new(delay: Duration, reply_tx: mpsc::UnboundedSender<AiReply>) -> Self {
        Self { delay, reply_tx }
    }

    /// Starts a search in the background.
    #[instrument(skip(self, request), fields(generation = request.generation))]
    pub fn spawn(&self, request: AiRequest) -> JoinHandle<()> {
        let delay = self.delay;
        let reply_tx = self.reply_tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let board = request.board;
            let position = match tokio::task::spawn_blocking(move || {
                find_best_move(&board, AI_PLAYER, HUMAN_PLAYER)
            })
            .await
            {
                Ok(position) => position,
                Err(e) => {
                    error!(error = %e, "Search task failed");
                    None
                }
            };

            let reply = AiReply {
                generation: request.generation,
                position,
            };
            if reply_tx.send(reply).is_err() {
                debug!("UI gone before AI reply");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::{Player, Square};

    #[tokio::test]
    async fn test_reply_carries_generation_and_move() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = AiWorker::new(Duration::ZERO, tx);

        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::TopCenter, Square::Occupied(Player::X));
        board.set(Position::MiddleLeft, Square::Occupied(Player::O));

        worker
            .spawn(AiRequest {
                generation: 7,
                board,
            })
            .await
            .expect("task completes");

        let reply = rx.recv().await.expect("reply sent");
        assert_eq!(reply.generation, 7);
        assert_eq!(reply.position, Some(Position::TopRight));
    }

    #[tokio::test]
    async fn test_full_board_replies_none() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = AiWorker::new(Duration::ZERO, tx);

        let mut board = Board::new();
        for (pos, player) in Position::ALL.into_iter().zip([
            Player::X,
            Player::O,
            Player::X,
            Player::X,
            Player::O,
            Player::O,
            Player::O,
            Player::X,
            Player::X,
        ]) {
            board.set(pos, Square::Occupied(player));
        }

        worker
            .spawn(AiRequest {
                generation: 1,
                board,
            })
            .await
            .expect("task completes");
        assert_eq!(rx.recv().await.expect("reply sent").position, None);
    }
}
