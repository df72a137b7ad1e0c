//! Shared fixtures for the unit tests.

use tether_graph::{
    build_graph, classify, BuildOptions, ClassDecl, ClassGraph, ClassInfo, Classification,
};
use tether_types::{ShapeId, ShapePool};

use crate::Model;

/// A built, classified and flag-marked run.
pub(crate) struct Fixture {
    pub graph: ClassGraph,
    pub pool: ShapePool,
    pub compat: Classification,
}

impl Fixture {
    pub fn new(decls: Vec<ClassDecl>) -> Self {
        let mut pool = ShapePool::new();
        let graph = build_graph(&decls, &mut pool, &BuildOptions::default()).unwrap();
        let compat = classify(&graph, &pool);
        pool.mark_client_constructible(compat.union_classes());
        Self {
            graph,
            pool,
            compat,
        }
    }

    pub fn model(&self) -> Model<'_> {
        Model::new(&self.graph, &self.pool, &self.compat)
    }

    pub fn class(&self, qualified: &str) -> &ClassInfo {
        self.graph.lookup(qualified).unwrap()
    }

    pub fn prop_shape(&self, qualified: &str, prop: &str) -> ShapeId {
        self.class(qualified)
            .properties
            .iter()
            .find(|p| p.name == prop)
            .unwrap()
            .shape
    }
}
