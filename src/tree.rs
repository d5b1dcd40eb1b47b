//! Huffman tree construction
//!
//! The tree is stored as an arena.  Leaves are created first, one for each
//! table entry in ascending symbol order, internal nodes are appended as they
//! are created.  Children are referred to by their index in the arena, so the
//! whole tree is released at once when the `Tree` is dropped.
//!
//! The priority queue orders nodes by (count, arena index).  Hence among equal
//! counts the lower symbol goes first, leaves go before internal nodes, and
//! older internal nodes go before newer ones.  Compression and decompression
//! both rely on this to rebuild the same tree from the same table.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use crate::freq::FrequencyTable;
use crate::{Error,Symbol,INTERNAL};

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Node {
    /// byte value or `EOF_SYMBOL` for a leaf, `INTERNAL` otherwise
    pub symbol: Symbol,
    /// for internal nodes this is the sum of the children's counts
    pub count: u64,
    /// index of the child reached with a 0 bit
    pub zero: Option<usize>,
    /// index of the child reached with a 1 bit
    pub one: Option<usize>
}

impl Node {
    fn leaf(symbol: Symbol,count: u64) -> Self {
        Self {
            symbol,
            count,
            zero: None,
            one: None
        }
    }
    fn branch(count: u64,zero: usize,one: Option<usize>) -> Self {
        Self {
            symbol: INTERNAL,
            count,
            zero: Some(zero),
            one
        }
    }
    pub fn is_leaf(&self) -> bool {
        self.zero.is_none() && self.one.is_none()
    }
}

#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: usize
}

impl Tree {
    /// Build the tree by repeatedly merging the two lightest nodes.
    /// The first node popped becomes the `zero` child, the second the `one` child.
    /// A table with a single entry gets a synthetic root whose only child is the
    /// `zero` branch, otherwise the lone symbol would have an empty code.
    pub fn build(freq: &FrequencyTable) -> Result<Self,Error> {
        if freq.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        let mut nodes: Vec<Node> = freq.iter().map(|(s,c)| Node::leaf(s,c)).collect();
        if nodes.len() == 1 {
            log::debug!("single symbol, adding synthetic root");
            nodes.push(Node::branch(nodes[0].count,0,None));
            return Ok(Self { nodes, root: 1 });
        }
        let mut queue: BinaryHeap<Reverse<(u64,usize)>> = nodes.iter()
            .enumerate()
            .map(|(i,n)| Reverse((n.count,i)))
            .collect();
        let root = loop {
            let Reverse((count0,zero)) = queue.pop().ok_or(Error::EmptyAlphabet)?;
            let Reverse((count1,one)) = match queue.pop() {
                Some(item) => item,
                None => break zero
            };
            let parent = nodes.len();
            nodes.push(Node::branch(count0 + count1,zero,Some(one)));
            queue.push(Reverse((count0 + count1,parent)));
        };
        log::debug!("built tree with {} nodes",nodes.len());
        Ok(Self { nodes, root })
    }
    pub fn root(&self) -> usize {
        self.root
    }
    /// get node by arena index, indices are only valid for the tree that produced them
    pub fn node(&self,idx: usize) -> &Node {
        &self.nodes[idx]
    }
    /// total number of nodes, leaves and internal
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Sum of count times depth over all leaves, i.e., the number of bits
    /// needed to code everything in the table.
    pub fn weighted_depth(&self) -> u64 {
        let mut ans = 0;
        let mut stack = vec![(self.root,0)];
        while let Some((idx,depth)) = stack.pop() {
            let node = &self.nodes[idx];
            if node.is_leaf() {
                ans += node.count * depth;
            }
            for child in [node.zero,node.one].into_iter().flatten() {
                stack.push((child,depth + 1));
            }
        }
        ans
    }
}

#[cfg(test)]
fn table_from(entries: &[(Symbol,u64)]) -> FrequencyTable {
    let mut ans = FrequencyTable::new();
    for (sym,count) in entries {
        ans.insert(*sym,*count);
    }
    ans
}

#[test]
fn four_equal_symbols() {
    let tree = Tree::build(&FrequencyTable::from("ab\n")).expect("build failed");
    // 4 leaves and 3 internal nodes
    assert_eq!(tree.len(),7);
    let root = tree.node(tree.root());
    assert_eq!(root.symbol,INTERNAL);
    assert_eq!(root.count,4);
    for child in [root.zero,root.one] {
        let child = tree.node(child.unwrap());
        assert!(!child.is_leaf());
        assert!(tree.node(child.zero.unwrap()).is_leaf());
        assert!(tree.node(child.one.unwrap()).is_leaf());
    }
    assert_eq!(tree.weighted_depth(),8);
}

#[test]
fn tie_break() {
    // equal counts are merged in symbol order
    let tree = Tree::build(&FrequencyTable::from("ab\n")).expect("build failed");
    let root = tree.node(tree.root());
    let left = tree.node(root.zero.unwrap());
    let right = tree.node(root.one.unwrap());
    assert_eq!(tree.node(left.zero.unwrap()).symbol,b'\n' as Symbol);
    assert_eq!(tree.node(left.one.unwrap()).symbol,b'a' as Symbol);
    assert_eq!(tree.node(right.zero.unwrap()).symbol,b'b' as Symbol);
    assert_eq!(tree.node(right.one.unwrap()).symbol,crate::EOF_SYMBOL);
}

#[test]
fn single_entry() {
    let tree = Tree::build(&FrequencyTable::count_slice(&[])).expect("build failed");
    let root = tree.node(tree.root());
    assert_eq!(root.symbol,INTERNAL);
    assert_eq!(root.one,None);
    let leaf = tree.node(root.zero.unwrap());
    assert_eq!(leaf.symbol,crate::EOF_SYMBOL);
    assert!(leaf.is_leaf());
    assert_eq!(tree.weighted_depth(),1);
}

#[test]
fn empty_table() {
    assert!(matches!(Tree::build(&FrequencyTable::new()),Err(Error::EmptyAlphabet)));
}

#[test]
fn optimality() {
    // merges are 6,15,25,31,56,101, which sum to 234
    let t1 = table_from(&[(0,45),(1,13),(2,12),(3,16),(4,9),(5,5),(crate::EOF_SYMBOL,1)]);
    let t2 = table_from(&[(0,1),(7,5),(20,9),(33,12),(34,13),(99,16),(200,45)]);
    let tree1 = Tree::build(&t1).expect("build failed");
    let tree2 = Tree::build(&t2).expect("build failed");
    assert_eq!(tree1.weighted_depth(),234);
    assert_eq!(tree2.weighted_depth(),234);
}

#[test]
fn deterministic() {
    let freq = FrequencyTable::from("I am Sam. Sam I am. I do not like this Sam I am.\n");
    assert_eq!(Tree::build(&freq).unwrap(),Tree::build(&freq).unwrap());
}
