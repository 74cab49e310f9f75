use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorInitialisationContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// Propagator for the constraint `|{ i | x_i = value }| = count`.
///
/// The count is bounded by the number of variables fixed to the value and the number of variables
/// which can still take it. When either bound of the count is reached, the remaining variables
/// are forced away from, respectively onto, the value.
#[derive(Debug)]
pub(crate) struct CountPropagator<Var, CountVar> {
    variables: Box<[Var]>,
    value: i32,
    count: CountVar,
}

impl<Var: IntegerVariable, CountVar: IntegerVariable> CountPropagator<Var, CountVar> {
    pub(crate) fn new(variables: Box<[Var]>, value: i32, count: CountVar) -> Self {
        CountPropagator {
            variables,
            value,
            count,
        }
    }

    /// Returns the number of variables fixed to the value and the number of variables which
    /// contain it.
    fn occurrences(&self, context: &impl ReadDomains) -> (i32, i32) {
        self.variables
            .iter()
            .fold((0, 0), |(fixed, possible), variable| {
                if !context.contains(variable, self.value) {
                    (fixed, possible)
                } else if context.is_fixed(variable) {
                    (fixed + 1, possible + 1)
                } else {
                    (fixed, possible + 1)
                }
            })
    }
}

impl<Var, CountVar> Propagator for CountPropagator<Var, CountVar>
where
    Var: IntegerVariable,
    CountVar: IntegerVariable,
{
    fn name(&self) -> &str {
        "Count"
    }

    fn priority(&self) -> u32 {
        1
    }

    fn initialise_at_root(
        &mut self,
        context: &mut PropagatorInitialisationContext<'_>,
    ) -> Result<(), Inconsistency> {
        self.variables
            .iter()
            .for_each(|variable| context.register(variable));
        context.register(&self.count);

        self.detect_inconsistency(context.as_readonly())
            .map_or(Ok(()), Err)
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatusCP {
        let (fixed, possible) = self.occurrences(&context);

        context.set_lower_bound(&self.count, fixed)?;
        context.set_upper_bound(&self.count, possible)?;

        let unfixed = self
            .variables
            .iter()
            .filter(|&variable| {
                context.contains(variable, self.value) && !context.is_fixed(variable)
            })
            .cloned()
            .collect::<Vec<_>>();

        if unfixed.is_empty() {
            return Ok(());
        }

        if fixed == context.upper_bound(&self.count) {
            for variable in unfixed.iter() {
                context.remove(variable, self.value)?;
            }
        } else if possible == context.lower_bound(&self.count) {
            for variable in unfixed.iter() {
                context.post(variable.equality_predicate(self.value))?;
            }
        }

        Ok(())
    }

    fn detect_inconsistency(&self, context: PropagationContext<'_>) -> Option<Inconsistency> {
        let (fixed, possible) = self.occurrences(&context);

        if fixed > context.upper_bound(&self.count) || possible < context.lower_bound(&self.count)
        {
            Some(Inconsistency::Conflict)
        } else {
            None
        }
    }
}
