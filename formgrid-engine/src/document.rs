//! Document Model
//!
//! The form as a tree: top-level items plus their layout, where SECTION items
//! own a nested item list and layout of the same shape.
//!
//! Documents are values. Every mutation returns a new `Document` and leaves
//! the receiver untouched; unchanged subtrees stay shared behind `Arc`, so a
//! renderer can hold a snapshot across a frame and detect change with
//! [`Document::ptr_eq`].

use std::collections::HashSet;
use std::sync::Arc;

use formgrid_api::{FieldType, GridPosition, GridRect, GridTarget, ItemId};

use crate::error::{GridError, Result};
use crate::id_gen::IdGenerator;

/// One grid's worth of content: items and their rectangles, joined by id.
#[derive(Debug, Clone, Default, PartialEq)]
struct Grid {
    items: Arc<Vec<Item>>,
    layout: Arc<Vec<GridRect>>,
}

impl Grid {
    fn contains_id(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| {
            &item.id == id || item.section.as_ref().is_some_and(|s| s.contains_id(id))
        })
    }

    fn find(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find_map(|item| {
            if &item.id == id {
                Some(item)
            } else {
                item.section.as_ref().and_then(|s| s.find(id))
            }
        })
    }

    /// The nested grid of section `id`, copying the path down to it.
    fn section_mut(&mut self, id: &ItemId) -> Option<&mut Grid> {
        let index = self.items.iter().position(|item| {
            &item.id == id || item.section.as_ref().is_some_and(|s| s.contains_id(id))
        })?;
        let item = &mut Arc::make_mut(&mut self.items)[index];
        let is_target = &item.id == id;
        let section = item.section.as_mut()?;
        if is_target {
            Some(section)
        } else {
            section.section_mut(id)
        }
    }

    fn section(&self, id: &ItemId) -> Option<&Grid> {
        self.find(id).and_then(|item| item.section.as_ref())
    }

    /// Check the id join and rectangle sizes, collecting every id seen.
    fn validate(&self, seen: &mut HashSet<ItemId>) -> Result<()> {
        check_layout_matches(&self.items, &self.layout)?;
        for rect in self.layout.iter() {
            if rect.w == 0 || rect.h == 0 {
                return Err(GridError::config(format!(
                    "rectangle {} has an empty span",
                    rect.id
                )));
            }
        }
        for item in self.items.iter() {
            if !seen.insert(item.id.clone()) {
                return Err(GridError::DuplicateId(item.id.clone()));
            }
            if let Some(section) = &item.section {
                section.validate(seen)?;
            }
        }
        Ok(())
    }
}

/// Every item has exactly one rectangle and every rectangle an item.
fn check_layout_matches(items: &[Item], layout: &[GridRect]) -> Result<()> {
    for (i, rect) in layout.iter().enumerate() {
        if !items.iter().any(|item| item.id == rect.id) {
            return Err(GridError::NotFound(rect.id.clone()));
        }
        if layout[..i].iter().any(|r| r.id == rect.id) {
            return Err(GridError::DuplicateId(rect.id.clone()));
        }
    }
    if let Some(missing) = items
        .iter()
        .find(|item| !layout.iter().any(|r| r.id == item.id))
    {
        return Err(GridError::NotFound(missing.id.clone()));
    }
    Ok(())
}

/// A placed field.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    field_type: FieldType,
    /// Present exactly when `field_type` is SECTION.
    section: Option<Grid>,
}

impl Item {
    /// A new item; sections start with an empty nested grid.
    pub fn new(id: ItemId, field_type: FieldType) -> Self {
        Self {
            id,
            field_type,
            section: field_type.is_section().then(Grid::default),
        }
    }

    /// A SECTION with existing content. The join is checked when the item
    /// enters a document.
    pub fn section_with(id: ItemId, children: Vec<Item>, layout: Vec<GridRect>) -> Self {
        Self {
            id,
            field_type: FieldType::Section,
            section: Some(Grid {
                items: Arc::new(children),
                layout: Arc::new(layout),
            }),
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_section(&self) -> bool {
        self.section.is_some()
    }

    /// Nested items, for sections.
    pub fn children(&self) -> Option<&[Item]> {
        self.section.as_ref().map(|s| s.items.as_slice())
    }

    /// Nested layout, for sections.
    pub fn child_layout(&self) -> Option<&[GridRect]> {
        self.section.as_ref().map(|s| s.layout.as_slice())
    }
}

/// A mutation to apply to a document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentDelta {
    /// Append an item and its rectangle to the target grid.
    Insert {
        target: GridTarget,
        id: ItemId,
        field_type: FieldType,
        position: GridPosition,
    },
    /// Replace the target grid's layout. Ids must match its items exactly.
    UpdateLayout {
        target: GridTarget,
        layout: Vec<GridRect>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Grid,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document from existing content, validated.
    pub fn from_seed(items: Vec<Item>, layout: Vec<GridRect>) -> Result<Self> {
        let root = Grid {
            items: Arc::new(items),
            layout: Arc::new(layout),
        };
        root.validate(&mut HashSet::new())?;
        Ok(Self { root })
    }

    /// The starter form: a header, two text fields and a checklist.
    pub fn sample(ids: &mut dyn IdGenerator) -> Self {
        let seed = [
            (FieldType::Header, GridPosition::new(0, 0, 1, 1)),
            (FieldType::TextField, GridPosition::new(1, 0, 3, 1)),
            (FieldType::Checklist, GridPosition::new(3, 1, 1, 1)),
            (FieldType::TextField, GridPosition::new(0, 1, 1, 1)),
        ];
        let mut items = Vec::with_capacity(seed.len());
        let mut layout = Vec::with_capacity(seed.len());
        for (field_type, position) in seed {
            let id = ids.next_id();
            layout.push(position.with_id(id.clone()));
            items.push(Item::new(id, field_type));
        }
        Self {
            root: Grid {
                items: Arc::new(items),
                layout: Arc::new(layout),
            },
        }
    }

    /// Top-level items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.root.items
    }

    /// Top-level layout, parallel to `items` by id.
    pub fn layout(&self) -> &[GridRect] {
        &self.root.layout
    }

    /// Find an item anywhere in the tree.
    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.root.find(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.root.contains_id(id)
    }

    /// Items of the grid addressed by `target`.
    pub fn items_for(&self, target: &GridTarget) -> Result<&[Item]> {
        Ok(&self.grid(target)?.items)
    }

    /// Layout of the grid addressed by `target`.
    pub fn layout_for(&self, target: &GridTarget) -> Result<&[GridRect]> {
        Ok(&self.grid(target)?.layout)
    }

    fn grid(&self, target: &GridTarget) -> Result<&Grid> {
        match target {
            GridTarget::Root => Ok(&self.root),
            GridTarget::Section(id) => self
                .root
                .section(id)
                .ok_or_else(|| GridError::NotFound(id.clone())),
        }
    }

    /// True if both values share the same top-level storage, i.e. nothing
    /// changed between them.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Arc::ptr_eq(&self.root.items, &other.root.items)
            && Arc::ptr_eq(&self.root.layout, &other.root.layout)
    }

    /// Append a new top-level item at `position`.
    pub fn insert_top_level(
        &self,
        field_type: FieldType,
        position: GridPosition,
        ids: &mut dyn IdGenerator,
    ) -> Result<(Document, ItemId)> {
        let id = ids.next_id();
        let next = self.apply(DocumentDelta::Insert {
            target: GridTarget::Root,
            id: id.clone(),
            field_type,
            position,
        })?;
        Ok((next, id))
    }

    /// Append a new item inside the SECTION `parent`.
    ///
    /// Fails with `NotFound` if `parent` is missing or is not a section.
    pub fn insert_nested(
        &self,
        field_type: FieldType,
        position: GridPosition,
        parent: &ItemId,
        ids: &mut dyn IdGenerator,
    ) -> Result<(Document, ItemId)> {
        if self.root.section(parent).is_none() {
            return Err(GridError::NotFound(parent.clone()));
        }
        let id = ids.next_id();
        let next = self.apply(DocumentDelta::Insert {
            target: GridTarget::Section(parent.clone()),
            id: id.clone(),
            field_type,
            position,
        })?;
        Ok((next, id))
    }

    /// Replace the layout of one grid.
    pub fn update_layout(&self, target: &GridTarget, layout: Vec<GridRect>) -> Result<Document> {
        self.apply(DocumentDelta::UpdateLayout {
            target: target.clone(),
            layout,
        })
    }

    /// Produce the document that results from applying `delta`.
    pub fn apply(&self, delta: DocumentDelta) -> Result<Document> {
        let mut next = self.clone();
        match delta {
            DocumentDelta::Insert {
                target,
                id,
                field_type,
                position,
            } => {
                if self.contains(&id) {
                    return Err(GridError::DuplicateId(id));
                }
                let grid = next.grid_mut(&target)?;
                Arc::make_mut(&mut grid.layout).push(position.with_id(id.clone()));
                Arc::make_mut(&mut grid.items).push(Item::new(id.clone(), field_type));
                tracing::debug!(%id, %field_type, grid = ?target, "inserted item");
            }
            DocumentDelta::UpdateLayout { target, layout } => {
                let grid = next.grid_mut(&target)?;
                check_layout_matches(&grid.items, &layout)?;
                grid.layout = Arc::new(layout);
                tracing::trace!(grid = ?target, "layout updated");
            }
        }
        Ok(next)
    }

    fn grid_mut(&mut self, target: &GridTarget) -> Result<&mut Grid> {
        match target {
            GridTarget::Root => Ok(&mut self.root),
            GridTarget::Section(id) => self
                .root
                .section_mut(id)
                .ok_or_else(|| GridError::NotFound(id.clone())),
        }
    }
}
