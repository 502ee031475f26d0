//! Client-side board state.
//!
//! The board mirrors what the user sees: three columns of cards in display
//! order. Moves are applied locally first and then reported to the server
//! as `{column, order}` where `order` is the card's 1-based position among
//! its new siblings. Request failures are logged and swallowed; local
//! changes are never rolled back.

use chrono::NaiveDate;

use super::BoardClient;
use crate::task::{task::due_date, Column, Task, TaskId, TaskPatch};

/// One rendered task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: TaskId,
    pub text: String,
    pub description: String,
    pub labels: Vec<String>,
    pub due_date: Option<NaiveDate>,
    /// Last order value known to this client
    pub order: u64,
}

impl Card {
    /// Due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < today)
    }

    fn sync(&mut self, task: &Task) {
        self.text = task.text.clone();
        self.description = task.description.clone();
        self.labels = task.labels.clone();
        self.due_date = task.due_date;
        self.order = task.order;
    }
}

impl From<Task> for Card {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            text: task.text,
            description: task.description,
            labels: task.labels,
            due_date: task.due_date,
            order: task.order,
        }
    }
}

/// Raw values of the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub text: String,
    pub description: String,
    /// Comma separated
    pub labels: String,
    /// `YYYY-MM-DD`, or empty for no date
    pub due_date: String,
}

impl EditForm {
    /// Prefill the dialog from a card.
    pub fn from_card(card: &Card) -> Self {
        Self {
            text: card.text.clone(),
            description: card.description.clone(),
            labels: card.labels.join(","),
            due_date: card
                .due_date
                .map(|d| d.format(due_date::FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// The content-only update this form submits.
    pub fn to_patch(&self) -> Result<TaskPatch, String> {
        Ok(TaskPatch {
            text: Some(self.text.clone()),
            description: Some(self.description.clone()),
            labels: Some(parse_labels(&self.labels)),
            due_date: Some(due_date::parse(&self.due_date)?),
            ..TaskPatch::default()
        })
    }
}

/// Split a comma-separated label field, trimming pieces and dropping empties.
pub fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// 1-based position of `id` among the ids of its container after a drop.
pub fn drop_position(siblings: &[TaskId], id: TaskId) -> Option<u64> {
    siblings
        .iter()
        .position(|sibling| *sibling == id)
        .map(|index| index as u64 + 1)
}

pub struct Board {
    client: BoardClient,
    columns: [Vec<Card>; 3],
}

impl Board {
    /// An empty board bound to `client`.
    pub fn new(client: BoardClient) -> Self {
        Self {
            client,
            columns: Default::default(),
        }
    }

    /// Fetch every task and lay the board out. A failed fetch leaves the
    /// board empty.
    pub async fn load(client: BoardClient) -> Self {
        let mut board = Self::new(client);
        board.refresh().await;
        board
    }

    /// Re-fetch and re-render all columns.
    pub async fn refresh(&mut self) {
        match self.client.list_tasks().await {
            Ok(tasks) => self.render(tasks),
            Err(e) => tracing::error!("Failed to load tasks: {:#}", e),
        }
    }

    /// Replace the board contents with `tasks`, each column sorted by order.
    pub fn render(&mut self, tasks: Vec<Task>) {
        let mut columns: [Vec<Card>; 3] = Default::default();
        for task in tasks {
            columns[task.column.index()].push(Card::from(task));
        }
        for cards in columns.iter_mut() {
            cards.sort_by_key(|card| card.order);
        }
        self.columns = columns;
    }

    pub fn column(&self, column: Column) -> &[Card] {
        &self.columns[column.index()]
    }

    pub fn card(&self, id: TaskId) -> Option<&Card> {
        let (column, index) = self.locate(id)?;
        self.columns[column.index()].get(index)
    }

    /// Column and display index of a card.
    pub fn locate(&self, id: TaskId) -> Option<(Column, usize)> {
        Column::ALL.into_iter().find_map(|column| {
            self.columns[column.index()]
                .iter()
                .position(|card| card.id == id)
                .map(|index| (column, index))
        })
    }

    /// Create a task from the input box. Blank input sends nothing.
    pub async fn add_task(&mut self, input: &str) -> Option<TaskId> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        match self.client.create_task(text).await {
            Ok(task) => {
                let id = task.id;
                self.columns[Column::Todo.index()].push(Card::from(task));
                Some(id)
            }
            Err(e) => {
                tracing::error!("Failed to create task: {:#}", e);
                None
            }
        }
    }

    /// Finish a drag: place the card at display `index` in `to` (clamped to
    /// the column length) and report the new placement. Returns the order
    /// sent, or `None` if the card is not on the board.
    pub async fn drop_card(&mut self, id: TaskId, to: Column, index: usize) -> Option<u64> {
        let (from, at) = self.locate(id)?;
        let card = self.columns[from.index()].remove(at);

        let target = &mut self.columns[to.index()];
        let index = index.min(target.len());
        target.insert(index, card);
        let siblings: Vec<TaskId> = target.iter().map(|c| c.id).collect();
        let order = drop_position(&siblings, id).unwrap_or(index as u64 + 1);
        target[index].order = order;

        if let Err(e) = self
            .client
            .update_task(id, &TaskPatch::moving(to, order))
            .await
        {
            tracing::error!("Failed to move task {}: {:#}", id, e);
        }
        Some(order)
    }

    /// Save the edit dialog. Card fields change only after the server
    /// accepts the update.
    pub async fn save_edit(&mut self, id: TaskId, form: &EditForm) -> bool {
        let patch = match form.to_patch() {
            Ok(patch) => patch,
            Err(e) => {
                tracing::error!("Failed to save task {}: {}", id, e);
                return false;
            }
        };
        match self.client.update_task(id, &patch).await {
            Ok(task) => {
                if let Some((column, index)) = self.locate(id) {
                    self.columns[column.index()][index].sync(&task);
                }
                true
            }
            Err(e) => {
                tracing::error!("Failed to save task {}: {:#}", id, e);
                false
            }
        }
    }

    /// Delete a card. It leaves the board once the server has answered.
    pub async fn remove(&mut self, id: TaskId) -> bool {
        if let Err(e) = self.client.delete_task(id).await {
            tracing::error!("Failed to delete task {}: {:#}", id, e);
            return false;
        }
        if let Some((column, index)) = self.locate(id) {
            self.columns[column.index()].remove(index);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: TaskId, column: Column, order: u64) -> Task {
        let mut task = Task::new(id, format!("task {}", id), order);
        task.column = column;
        task
    }

    /// A client whose requests all fail with connection refused.
    fn unreachable_client() -> BoardClient {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        BoardClient::new(format!("http://{}", addr))
    }

    fn ids(board: &Board, column: Column) -> Vec<TaskId> {
        board.column(column).iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(parse_labels(" errand, urgent ,,"), vec!["errand", "urgent"]);
        assert!(parse_labels("").is_empty());
        assert!(parse_labels(" , ").is_empty());
    }

    #[test]
    fn test_drop_position_is_one_based() {
        assert_eq!(drop_position(&[7, 3, 9], 7), Some(1));
        assert_eq!(drop_position(&[7, 3, 9], 9), Some(3));
        assert_eq!(drop_position(&[7, 3, 9], 4), None);
    }

    #[test]
    fn test_overdue_is_strictly_before_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut card = Card::from(task(1, Column::Todo, 1));
        assert!(!card.is_overdue(today));

        card.due_date = today.pred_opt();
        assert!(card.is_overdue(today));

        card.due_date = Some(today);
        assert!(!card.is_overdue(today));
    }

    #[test]
    fn test_edit_form_round_trip_through_patch() {
        let mut card = Card::from(task(1, Column::Doing, 2));
        card.labels = vec!["a".to_string(), "b".to_string()];
        card.due_date = NaiveDate::from_ymd_opt(2026, 2, 3);

        let form = EditForm::from_card(&card);
        assert_eq!(form.labels, "a,b");
        assert_eq!(form.due_date, "2026-02-03");

        let patch = form.to_patch().unwrap();
        assert_eq!(patch.labels, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(patch.due_date, Some(card.due_date));
        assert!(!patch.is_move());
    }

    #[test]
    fn test_edit_form_blank_date_clears() {
        let form = EditForm {
            text: "x".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_patch().unwrap().due_date, Some(None));

        let bad = EditForm {
            due_date: "soon".to_string(),
            ..Default::default()
        };
        assert!(bad.to_patch().is_err());
    }

    #[test]
    fn test_render_sorts_each_column_by_order() {
        let mut board = Board::new(unreachable_client());
        board.render(vec![
            task(1, Column::Doing, 4),
            task(2, Column::Done, 1),
            task(3, Column::Doing, 2),
            task(4, Column::Todo, 9),
            task(5, Column::Todo, 3),
        ]);

        assert_eq!(ids(&board, Column::Todo), vec![5, 4]);
        assert_eq!(ids(&board, Column::Doing), vec![3, 1]);
        assert_eq!(ids(&board, Column::Done), vec![2]);
        assert_eq!(board.locate(1), Some((Column::Doing, 1)));
    }

    #[tokio::test]
    async fn test_drop_is_optimistic_when_server_unreachable() {
        let mut board = Board::new(unreachable_client());
        board.render(vec![
            task(1, Column::Todo, 1),
            task(2, Column::Doing, 1),
            task(3, Column::Doing, 2),
        ]);

        let order = board.drop_card(1, Column::Doing, 1).await;

        assert_eq!(order, Some(2));
        assert_eq!(ids(&board, Column::Doing), vec![2, 1, 3]);
        assert!(board.column(Column::Todo).is_empty());
    }

    #[tokio::test]
    async fn test_drop_index_is_clamped_to_column_end() {
        let mut board = Board::new(unreachable_client());
        board.render(vec![task(1, Column::Todo, 1), task(2, Column::Done, 1)]);

        let order = board.drop_card(1, Column::Done, 50).await;

        assert_eq!(order, Some(2));
        assert_eq!(ids(&board, Column::Done), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_drop_unknown_card_is_ignored() {
        let mut board = Board::new(unreachable_client());
        assert_eq!(board.drop_card(99, Column::Done, 0).await, None);
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let mut board = Board::load(unreachable_client()).await;
        assert!(Column::ALL.iter().all(|c| board.column(*c).is_empty()));

        assert_eq!(board.add_task("Buy milk").await, None);
        assert!(board.column(Column::Todo).is_empty());

        board.render(vec![task(1, Column::Todo, 1)]);
        let form = EditForm {
            text: "changed".to_string(),
            ..Default::default()
        };
        assert!(!board.save_edit(1, &form).await);
        assert_eq!(board.card(1).unwrap().text, "task 1");

        assert!(!board.remove(1).await);
        assert!(board.card(1).is_some());
    }

    #[tokio::test]
    async fn test_blank_input_sends_nothing() {
        let mut board = Board::new(unreachable_client());
        assert_eq!(board.add_task("   ").await, None);
    }
}
