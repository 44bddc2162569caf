//! In-memory storage provider used by the use case tests

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Email, Item, ItemId, ItemKind};
use crate::ports::{IStorageProvider, ProviderError};

pub fn id(s: &str) -> ItemId {
    ItemId::new(s.to_string()).unwrap()
}

pub fn email(s: &str) -> Email {
    Email::new(s.to_string()).unwrap()
}

/// A fake drive: a flat item table plus ordered child lists
#[derive(Default)]
pub struct FakeDrive {
    items: HashMap<ItemId, Item>,
    children: HashMap<ItemId, Vec<ItemId>>,
    denied: HashSet<ItemId>,
    broken_listings: HashSet<ItemId>,
    cross_domain: HashSet<ItemId>,
    mutation_errors: HashMap<ItemId, ProviderError>,
    owned: Vec<ItemId>,
    owners: Mutex<HashMap<ItemId, String>>,
    editors: Mutex<HashMap<ItemId, BTreeSet<String>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeDrive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder(mut self, folder: &str, name: &str) -> Self {
        self.items
            .insert(id(folder), Item::folder(id(folder), name).with_owner("me@example.com"));
        self.children.entry(id(folder)).or_default();
        self
    }

    pub fn with_file(mut self, file: &str, name: &str) -> Self {
        self.items.insert(
            id(file),
            Item::file(id(file), name)
                .with_owner("me@example.com")
                .with_size(100),
        );
        self
    }

    /// Appends `child` to `parent`'s listing (order matters)
    pub fn with_child(mut self, parent: &str, child: &str) -> Self {
        self.children.entry(id(parent)).or_default().push(id(child));
        self
    }

    pub fn with_denied(mut self, item: &str) -> Self {
        self.denied.insert(id(item));
        self
    }

    pub fn with_broken_listing(mut self, folder: &str) -> Self {
        self.broken_listings.insert(id(folder));
        self
    }

    pub fn with_cross_domain(mut self, item: &str) -> Self {
        self.cross_domain.insert(id(item));
        self
    }

    pub fn with_mutation_error(mut self, item: &str, err: ProviderError) -> Self {
        self.mutation_errors.insert(id(item), err);
        self
    }

    pub fn with_owned(mut self, item: &str) -> Self {
        self.owned.push(id(item));
        self
    }

    pub fn owner_of(&self, item: &str) -> Option<String> {
        self.owners.lock().unwrap().get(&id(item)).cloned()
    }

    pub fn editors_of(&self, item: &str) -> Vec<String> {
        self.editors
            .lock()
            .unwrap()
            .get(&id(item))
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn resolve(&self, item: &ItemId, expected: ItemKind) -> Result<Item, ProviderError> {
        if self.denied.contains(item) {
            return Err(ProviderError::AccessDenied(format!(
                "The user does not have sufficient permissions for file {item}."
            )));
        }
        let found = self
            .items
            .get(item)
            .ok_or_else(|| ProviderError::NotFound(format!("File not found: {item}.")))?;
        if found.kind != expected {
            return Err(ProviderError::WrongKind {
                id: item.clone(),
                expected,
                actual: found.kind,
            });
        }
        Ok(found.clone())
    }

    fn children_of(&self, folder: &ItemId, kind: ItemKind) -> Result<Vec<Item>, ProviderError> {
        self.resolve(folder, ItemKind::Folder)?;
        if self.broken_listings.contains(folder) {
            return Err(ProviderError::Unknown("Internal Error".to_string()));
        }
        Ok(self
            .children
            .get(folder)
            .into_iter()
            .flatten()
            .filter_map(|c| self.items.get(c))
            .filter(|c| c.kind == kind)
            .cloned()
            .collect())
    }

    fn owned_of_kind(&self, kind: ItemKind) -> Vec<Item> {
        self.owned
            .iter()
            .filter_map(|o| self.items.get(o))
            .filter(|i| i.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl IStorageProvider for FakeDrive {
    async fn list_owned_folders(&self) -> Result<Vec<Item>, ProviderError> {
        self.record("list_owned_folders".into());
        Ok(self.owned_of_kind(ItemKind::Folder))
    }

    async fn list_owned_files(&self) -> Result<Vec<Item>, ProviderError> {
        self.record("list_owned_files".into());
        Ok(self.owned_of_kind(ItemKind::File))
    }

    async fn get_file(&self, item: &ItemId) -> Result<Item, ProviderError> {
        self.record(format!("get_file {item}"));
        self.resolve(item, ItemKind::File)
    }

    async fn get_folder(&self, item: &ItemId) -> Result<Item, ProviderError> {
        self.record(format!("get_folder {item}"));
        self.resolve(item, ItemKind::Folder)
    }

    async fn list_child_files(&self, folder: &ItemId) -> Result<Vec<Item>, ProviderError> {
        self.record(format!("list_child_files {folder}"));
        self.children_of(folder, ItemKind::File)
    }

    async fn list_child_folders(&self, folder: &ItemId) -> Result<Vec<Item>, ProviderError> {
        self.record(format!("list_child_folders {folder}"));
        self.children_of(folder, ItemKind::Folder)
    }

    async fn set_owner(&self, item: &Item, account: &Email) -> Result<(), ProviderError> {
        self.record(format!("set_owner {}", item.id));
        if self.cross_domain.contains(&item.id) {
            return Err(ProviderError::UnsupportedTransfer(
                "Bad Request. User message: \"You can't change the owner of this item.\""
                    .to_string(),
            ));
        }
        if let Some(err) = self.mutation_errors.get(&item.id) {
            return Err(err.clone());
        }
        self.owners
            .lock()
            .unwrap()
            .insert(item.id.clone(), account.to_string());
        Ok(())
    }

    async fn add_editor(&self, item: &Item, account: &Email) -> Result<(), ProviderError> {
        self.record(format!("add_editor {}", item.id));
        if let Some(err) = self.mutation_errors.get(&item.id) {
            return Err(err.clone());
        }
        self.editors
            .lock()
            .unwrap()
            .entry(item.id.clone())
            .or_default()
            .insert(account.to_string());
        Ok(())
    }
}
