use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::commands::{
    ApplyCardOrder, ApplyListOrder, Command, CommandContext, CreateBoard, CreateCard, CreateList,
    DeleteCard, UpdateCard,
};
use kanban_domain::{
    Board, BoardId, Card, CardDraft, CardId, CardOrder, CardUpdate, List, ListId, ListOrder,
    ListWithCards,
};
use serde::{Deserialize, Serialize};

/// Every board, list and card held by an in-memory store.
///
/// Mutations go through domain commands; reads apply the organization
/// ownership filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardData {
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl BoardData {
    pub fn execute(&mut self, command: &dyn Command) -> KanbanResult<()> {
        tracing::debug!("Executing: {}", command.description());
        let mut ctx = CommandContext {
            boards: &mut self.boards,
            lists: &mut self.lists,
            cards: &mut self.cards,
        };
        command.execute(&mut ctx)
    }

    pub fn board(&self, org_id: &str, board_id: BoardId) -> Option<&Board> {
        self.boards
            .iter()
            .find(|b| b.id == board_id && b.belongs_to(org_id))
    }

    pub fn boards_of(&self, org_id: &str) -> Vec<Board> {
        self.boards
            .iter()
            .filter(|b| b.belongs_to(org_id))
            .cloned()
            .collect()
    }

    /// The list, if its board belongs to `org_id`.
    pub fn list(&self, org_id: &str, list_id: ListId) -> Option<&List> {
        self.lists
            .iter()
            .find(|l| l.id == list_id)
            .filter(|l| self.board(org_id, l.board_id).is_some())
    }

    /// The card, if its list's board belongs to `org_id`.
    pub fn card(&self, org_id: &str, card_id: CardId) -> Option<&Card> {
        self.cards
            .iter()
            .find(|c| c.id == card_id)
            .filter(|c| self.list(org_id, c.list_id).is_some())
    }

    fn cards_of(&self, list_id: ListId) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .cards
            .iter()
            .filter(|c| c.list_id == list_id)
            .cloned()
            .collect();
        cards.sort_by_key(|c| (c.order, c.created_at));
        cards
    }

    pub fn board_view(&self, org_id: &str, board_id: BoardId) -> KanbanResult<Vec<ListWithCards>> {
        if self.board(org_id, board_id).is_none() {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }
        let mut lists: Vec<&List> = self
            .lists
            .iter()
            .filter(|l| l.board_id == board_id)
            .collect();
        lists.sort_by_key(|l| (l.order, l.created_at));

        Ok(lists
            .into_iter()
            .map(|l| ListWithCards::new(l.clone(), self.cards_of(l.id)))
            .collect())
    }

    pub fn list_with_cards(
        &self,
        org_id: &str,
        board_id: BoardId,
        list_id: ListId,
    ) -> Option<ListWithCards> {
        self.list(org_id, list_id)
            .filter(|l| l.board_id == board_id)
            .map(|l| ListWithCards::new(l.clone(), self.cards_of(l.id)))
    }

    pub fn last_list_order(&self, board_id: BoardId) -> Option<i32> {
        self.lists
            .iter()
            .filter(|l| l.board_id == board_id)
            .map(|l| l.order)
            .max()
    }

    pub fn last_card_order(&self, list_id: ListId) -> Option<i32> {
        self.cards
            .iter()
            .filter(|c| c.list_id == list_id)
            .map(|c| c.order)
            .max()
    }

    pub fn create_board(&mut self, org_id: &str, title: &str) -> KanbanResult<Board> {
        self.execute(&CreateBoard {
            org_id: org_id.to_string(),
            title: title.to_string(),
        })?;
        self.boards.last().cloned().ok_or_else(|| {
            KanbanError::Internal("Board creation succeeded but board not found".into())
        })
    }

    pub fn create_list(
        &mut self,
        board_id: BoardId,
        title: &str,
        order: i32,
        drafts: Vec<CardDraft>,
    ) -> KanbanResult<ListWithCards> {
        if !self.boards.iter().any(|b| b.id == board_id) {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }
        self.execute(&CreateList {
            board_id,
            title: title.to_string(),
            order,
        })?;
        let list = self.lists.last().cloned().ok_or_else(|| {
            KanbanError::Internal("List creation succeeded but list not found".into())
        })?;

        for draft in drafts {
            self.execute(&CreateCard {
                list_id: list.id,
                draft,
            })?;
        }
        let cards = self.cards_of(list.id);
        Ok(ListWithCards::new(list, cards))
    }

    pub fn create_card(&mut self, list_id: ListId, draft: CardDraft) -> KanbanResult<Card> {
        if !self.lists.iter().any(|l| l.id == list_id) {
            return Err(KanbanError::NotFound(format!("List {}", list_id)));
        }
        self.execute(&CreateCard { list_id, draft })?;
        self.cards.last().cloned().ok_or_else(|| {
            KanbanError::Internal("Card creation succeeded but card not found".into())
        })
    }

    pub fn update_card(
        &mut self,
        org_id: &str,
        card_id: CardId,
        updates: CardUpdate,
    ) -> KanbanResult<Card> {
        if self.card(org_id, card_id).is_none() {
            return Err(KanbanError::NotFound(format!("Card {}", card_id)));
        }
        self.execute(&UpdateCard { card_id, updates })?;
        self.card(org_id, card_id)
            .cloned()
            .ok_or_else(|| KanbanError::NotFound(format!("Card {}", card_id)))
    }

    pub fn delete_card(&mut self, org_id: &str, card_id: CardId) -> KanbanResult<Card> {
        let card = self
            .card(org_id, card_id)
            .cloned()
            .ok_or_else(|| KanbanError::NotFound(format!("Card {}", card_id)))?;
        self.execute(&DeleteCard { card_id })?;
        Ok(card)
    }

    pub fn update_list_order(
        &mut self,
        org_id: &str,
        board_id: BoardId,
        items: &[ListOrder],
    ) -> KanbanResult<Vec<List>> {
        if self.board(org_id, board_id).is_none() {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }
        self.execute(&ApplyListOrder {
            board_id,
            items: items.to_vec(),
        })?;
        Ok(items
            .iter()
            .filter_map(|item| self.lists.iter().find(|l| l.id == item.id).cloned())
            .collect())
    }

    pub fn update_card_order(
        &mut self,
        org_id: &str,
        board_id: BoardId,
        items: &[CardOrder],
    ) -> KanbanResult<Vec<Card>> {
        if self.board(org_id, board_id).is_none() {
            return Err(KanbanError::NotFound(format!("Board {}", board_id)));
        }
        let in_board = |list_id: ListId| {
            self.lists
                .iter()
                .any(|l| l.id == list_id && l.board_id == board_id)
        };
        for item in items {
            let current = self
                .cards
                .iter()
                .find(|c| c.id == item.id)
                .ok_or_else(|| KanbanError::NotFound(format!("Card {}", item.id)))?;
            if !in_board(current.list_id) || !in_board(item.list_id) {
                return Err(KanbanError::NotFound(format!(
                    "Card {} on board {}",
                    item.id, board_id
                )));
            }
        }

        self.execute(&ApplyCardOrder {
            items: items.to_vec(),
        })?;
        Ok(items
            .iter()
            .filter_map(|item| self.cards.iter().find(|c| c.id == item.id).cloned())
            .collect())
    }
}
