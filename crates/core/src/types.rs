/// Entity ids are opaque strings issued by the persistence layer.
pub type EntityId = String;
