/// Трейт для корня агрегата: сущность, которая хранится в собственной
/// коллекции документного хранилища
pub trait AggregateRoot {
    /// Имя коллекции в документном хранилище (например, "orders")
    fn collection_name() -> &'static str;
}
