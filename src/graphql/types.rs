use juniper::{graphql_object, GraphQLInputObject, ID};

use super::Context;
use crate::catalog::Movie;
use crate::error::Error;
use crate::people::{Homeworld, Person};

#[graphql_object]
#[graphql(description = "A film of the saga")]
impl Movie {
    fn id(&self) -> Option<i32> {
        Some(self.id)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

#[graphql_object]
#[graphql(description = "A planet from the Star Wars API")]
impl Homeworld {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn terrain(&self) -> Option<&str> {
        self.terrain.as_deref()
    }
}

#[graphql_object]
#[graphql(context = Context, description = "A character from the Star Wars API")]
impl Person {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[graphql(name = "birth_year")]
    fn birth_year(&self) -> Option<&str> {
        self.birth_year.as_deref()
    }

    /// Fetched from the person's homeworld URL only when selected.
    async fn homeworld(&self, context: &Context) -> Result<Option<Homeworld>, Error> {
        context.people.homeworld(self).await.map_err(|err| {
            log::warn!("Failed to resolve homeworld of {:?}: {}", self.name, err);
            err
        })
    }
}

/// Input of `addMovie`. The catalog assigns the id, so `id` is ignored.
#[derive(Debug, Default, GraphQLInputObject)]
pub struct NewMovie {
    pub id: Option<ID>,
    pub tag: Option<String>,
    pub name: Option<String>,
}
