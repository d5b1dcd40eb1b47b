//! Code table derived from the Huffman tree

use bit_vec::BitVec;
use std::collections::BTreeMap;
use crate::tree::Tree;
use crate::Symbol;

/// Map from symbol to the path from the root to its leaf,
/// a 0 bit selects the `zero` branch and a 1 bit selects the `one` branch.
#[derive(Clone,Debug,PartialEq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol,BitVec>
}

impl CodeTable {
    /// Depth first walk using an explicit stack of (node, path so far).
    /// Each child gets its own copy of the path, so nothing leaks between siblings.
    pub fn from_tree(tree: &Tree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(tree.root(),BitVec::new())];
        while let Some((idx,path)) = stack.pop() {
            let node = tree.node(idx);
            if node.is_leaf() {
                log::trace!("symbol {} has code {}",node.symbol,bits_to_string(&path));
                codes.insert(node.symbol,path);
                continue;
            }
            if let Some(one) = node.one {
                let mut branch = path.clone();
                branch.push(true);
                stack.push((one,branch));
            }
            if let Some(zero) = node.zero {
                let mut branch = path;
                branch.push(false);
                stack.push((zero,branch));
            }
        }
        Self { codes }
    }
    pub fn get(&self,sym: Symbol) -> Option<&BitVec> {
        self.codes.get(&sym)
    }
    pub fn len(&self) -> usize {
        self.codes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
    /// iterate over (symbol,code) in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol,&BitVec)> + '_ {
        self.codes.iter().map(|(s,c)| (*s,c))
    }
}

/// Render bits as a string of '0' and '1'
pub fn bits_to_string(bits: &BitVec) -> String {
    bits.iter().map(|b| if b { '1' } else { '0' }).collect()
}

#[cfg(test)]
fn is_prefix(short: &BitVec,long: &BitVec) -> bool {
    short.len() <= long.len() && short.iter().zip(long.iter()).all(|(a,b)| a==b)
}

#[test]
fn two_bit_codes() {
    let tree = Tree::build(&crate::freq::FrequencyTable::from("ab\n")).expect("build failed");
    let table = CodeTable::from_tree(&tree);
    let actual: Vec<(Symbol,String)> = table.iter().map(|(s,c)| (s,bits_to_string(c))).collect();
    let expected: Vec<(Symbol,String)> = vec![
        (10,"00".to_string()),
        (97,"01".to_string()),
        (98,"10".to_string()),
        (crate::EOF_SYMBOL,"11".to_string())
    ];
    assert_eq!(actual,expected);
}

#[test]
fn single_leaf_gets_one_bit() {
    let tree = Tree::build(&crate::freq::FrequencyTable::count_slice(&[])).expect("build failed");
    let table = CodeTable::from_tree(&tree);
    assert_eq!(table.len(),1);
    assert_eq!(bits_to_string(table.get(crate::EOF_SYMBOL).unwrap()),"0");
}

#[test]
fn repeated_symbol() {
    let tree = Tree::build(&crate::freq::FrequencyTable::from("aaaa")).expect("build failed");
    let table = CodeTable::from_tree(&tree);
    assert_eq!(bits_to_string(table.get(crate::EOF_SYMBOL).unwrap()),"0");
    assert_eq!(bits_to_string(table.get(b'a' as Symbol).unwrap()),"1");
}

#[test]
fn prefix_free() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n";
    let tree = Tree::build(&crate::freq::FrequencyTable::from(test_data)).expect("build failed");
    let table = CodeTable::from_tree(&tree);
    for (s1,c1) in table.iter() {
        assert!(!c1.is_empty());
        for (s2,c2) in table.iter() {
            if s1 != s2 {
                assert!(!is_prefix(c1,c2),"code of {} is a prefix of code of {}",s1,s2);
            }
        }
    }
}
