//! 同期進捗トラッカー(状態マシン)
//!
//! リモート同期のライフサイクルとファイル数進捗を追跡し、
//! 呼び出し側の UI フィードバックに公開する。
//!
//! ## 状態遷移図
//!
//! ```text
//!        ┌─────────────┐
//!   ┌───▶│    Idle     │
//!   │    └──────┬──────┘
//!   │           │ begin(ingredient_count)
//!   │           ▼
//!   │    ┌─────────────┐
//!   │    │   Running   │──┐
//!   │    └──────┬──────┘  │ advance()
//!   │           │         │
//!   │           │◀────────┘
//!   │      reset()
//!   └───────────┘
//! ```
//!
//! `reset()` は成功・失敗・検証却下のいずれでも無条件に実行される。

/// 呼び出し側に公開する進捗スナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub sync_started: bool,
    pub total_files: usize,
    pub completed_files: usize,
}

/// 状態マシンの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running,
}

/// 同期進捗トラッカー
///
/// total = ingredients 数 + 2(マニフェスト取得と終端ステップ)。
/// 不変条件: Running 中は常に completed <= total。
#[derive(Debug)]
pub struct ProgressTracker {
    state: State,
    total_files: usize,
    completed_files: usize,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            total_files: 0,
            completed_files: 0,
        }
    }

    /// Idle → Running
    ///
    /// マニフェスト取得自体がステップ1として数えられる。
    pub fn begin(&mut self, ingredient_count: usize) {
        self.state = State::Running;
        self.total_files = ingredient_count + 2;
        self.completed_files = 1;
    }

    /// 完了ファイル数をひとつ進める
    ///
    /// Running 中のみ有効。total を超えてはカウントしない。
    pub fn advance(&mut self) {
        if self.state == State::Running && self.completed_files < self.total_files {
            self.completed_files += 1;
        }
    }

    /// 無条件リセット(→ Idle)
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.total_files = 0;
        self.completed_files = 0;
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn completed_files(&self) -> usize {
        self.completed_files
    }

    /// UI 用スナップショット
    pub fn snapshot(&self) -> ProgressState {
        ProgressState {
            sync_started: self.is_running(),
            total_files: self.total_files,
            completed_files: self.completed_files,
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;

#[cfg(test)]
#[path = "progress_proptests.rs"]
mod proptests;
