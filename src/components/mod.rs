pub mod similarity_graph;
